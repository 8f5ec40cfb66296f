//! Reading and writing the container representation embedded in a carrier item.
//!
//! A carrier is any stack whose metadata holds the [`CONTAINER_TAG`] attribute. The
//! attribute value is a JSON object of string fields; an empty object marks a carrier
//! for a container that has not been materialized yet.

use std::collections::BTreeMap;

use crate::item::{Inventory, ItemMeta, ItemStack, Slot};

/// Namespaced tag key that marks a carrier.
pub const CONTAINER_TAG: &str = "satchel:container";

/// Item kind used for freshly crafted carriers.
pub const CARRIER_KIND: &str = "player_head";

/// Raw persisted fields, keyed by name.
pub type Representation = BTreeMap<String, String>;

/// Field names inside the representation.
pub mod fields {
    /// Unique id, assigned once.
    pub const ID: &str = "id";
    /// Display name.
    pub const NAME: &str = "name";
    /// Palette key.
    pub const COLOR: &str = "color";
    /// Tier key.
    pub const TIER: &str = "tier";
    /// Codec blob of the slots.
    pub const CONTENTS: &str = "contents";
    /// Creation time, epoch ms.
    pub const CREATED: &str = "created";
    /// Last open time, epoch ms or `-1`.
    pub const LAST_OPENED: &str = "last_opened";
    /// Codec blob of the pre-truncation slots, when a truncation happened.
    pub const UNCUT_CONTENTS: &str = "uncut_contents";
}

/// True when `stack` carries the container tag (even an empty one).
#[must_use]
pub fn is_carrier(stack: &ItemStack) -> bool {
    stack.tag(CONTAINER_TAG).is_some()
}

/// Slot-level form of [`is_carrier`].
#[must_use]
pub fn slot_is_carrier(slot: &Slot) -> bool {
    slot.as_ref().is_some_and(is_carrier)
}

/// What: Build a blank carrier, as the crafting recipe would produce it.
#[must_use]
pub fn blank_carrier() -> ItemStack {
    let mut meta = ItemMeta::default();
    meta.tags.insert(CONTAINER_TAG.to_string(), "{}".to_string());
    ItemStack::new(CARRIER_KIND, 1).with_meta(meta)
}

/// What: Parse the representation stored on a carrier.
///
/// Output:
/// - Stored fields; empty for a blank or unreadable tag
///
/// Details:
/// - A corrupt value is logged and treated as a new container.
#[must_use]
pub fn read_representation(stack: &ItemStack) -> Representation {
    let Some(raw) = stack.tag(CONTAINER_TAG) else {
        return Representation::new();
    };
    if raw.trim().is_empty() {
        return Representation::new();
    }
    serde_json::from_str(raw).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "[Container] Unreadable carrier tag; starting empty");
        Representation::new()
    })
}

/// Container id stored on a carrier, if it has one.
#[must_use]
pub fn carrier_id(stack: &ItemStack) -> Option<String> {
    if !is_carrier(stack) {
        return None;
    }
    read_representation(stack).remove(fields::ID)
}

/// What: Index of the first carrier at or after `start`.
#[must_use]
pub fn find_forward(inventory: &Inventory, start: usize) -> Option<usize> {
    (start..inventory.len()).find(|&i| inventory.get(i).is_some_and(is_carrier))
}

/// What: Index of the last carrier at or before `start`.
///
/// Details:
/// - `start` past the end is clamped to the last slot.
#[must_use]
pub fn find_backward(inventory: &Inventory, start: usize) -> Option<usize> {
    if inventory.is_empty() {
        return None;
    }
    let start = start.min(inventory.len() - 1);
    (0..=start)
        .rev()
        .find(|&i| inventory.get(i).is_some_and(is_carrier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_carrier_is_tagged_and_empty() {
        let carrier = blank_carrier();
        assert!(is_carrier(&carrier));
        assert!(read_representation(&carrier).is_empty());
        assert_eq!(carrier_id(&carrier), None);
        assert!(!is_carrier(&ItemStack::new("leather", 1)));
    }

    #[test]
    fn corrupt_tag_reads_as_empty() {
        let mut carrier = blank_carrier();
        if let Some(meta) = carrier.meta.as_mut() {
            meta.tags
                .insert(CONTAINER_TAG.to_string(), "{not json".to_string());
        }
        assert!(read_representation(&carrier).is_empty());
    }

    #[test]
    /// What: Directional scans skip plain items and respect their start points.
    fn scans_find_carriers_in_both_directions() {
        let mut inv = Inventory::new(10);
        inv.set(1, Some(blank_carrier()));
        inv.set(2, Some(ItemStack::new("torch", 16)));
        inv.set(6, Some(blank_carrier()));
        assert_eq!(find_forward(&inv, 0), Some(1));
        assert_eq!(find_forward(&inv, 2), Some(6));
        assert_eq!(find_forward(&inv, 7), None);
        assert_eq!(find_backward(&inv, 5), Some(1));
        assert_eq!(find_backward(&inv, 99), Some(6));
        assert_eq!(find_backward(&inv, 0), None);
    }
}
