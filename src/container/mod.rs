//! Container data model.
//!
//! A container lives inside a carrier item in its owner's inventory. This module
//! covers the palette and tier tables, the carrier tag format and the stateful
//! [`Container`] entity with its self-healing reconcile pass.

mod carrier;
mod entity;
mod types;

pub use carrier::{
    CARRIER_KIND, CONTAINER_TAG, Representation, blank_carrier, carrier_id, fields, find_backward,
    find_forward, is_carrier, read_representation, slot_is_carrier,
};
pub use entity::{Container, ContainerDefaults};
pub use types::{Color, ROW_SLOTS, Tier};

#[cfg(test)]
mod tests;
