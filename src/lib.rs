//! Library entry for satchel: per-actor backpacks stored inside carrier items.
//!
//! - [`container`]: the container entity, its palette/tier tables and carrier format
//! - [`codec`]: item lists to and from Base64 blobs
//! - [`config`]: the self-healing YAML config store
//! - [`ui`]: the grid-UI engine and the main, customizer and admin screens
//! - [`host`]: traits the embedding host implements

pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod host;
pub mod item;
pub mod paths;
pub mod permissions;
pub mod ui;
pub mod util;

pub use error::{Result, SatchelError};
