//! Host item model: stacks, their metadata, and the actor inventory.
//!
//! Items are opaque to the container logic. The only things it relies on are
//! the stack kind, the amount, the metadata tag map (where carriers keep their
//! persisted representation) and the similarity predicate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

mod inventory;

pub use inventory::{HOTBAR_SIZE, Inventory};

/// Kind used by hosts for an explicitly-typed empty stack.
pub const AIR: &str = "air";

/// Optional presentation and tag data attached to a stack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMeta {
    /// Custom display name shown instead of the kind's default name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Descriptive lines shown under the name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lore: Vec<String>,
    /// Visual texture identifier, when the host supports custom textures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    /// Namespaced string attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// One stack of items as the host models it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Host item type, e.g. `"leather"` or `"red_dye"`.
    pub kind: String,
    /// Number of units in the stack.
    pub amount: u32,
    /// Attached metadata; `None` for plain stacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ItemMeta>,
}

/// A grid or inventory position: empty, or holding a stack.
pub type Slot = Option<ItemStack>;

impl ItemStack {
    /// What: Build a plain stack without metadata.
    ///
    /// Inputs:
    /// - `kind`: Host item type
    /// - `amount`: Unit count
    ///
    /// Output:
    /// - New `ItemStack` with `meta = None`
    #[must_use]
    pub fn new(kind: impl Into<String>, amount: u32) -> Self {
        Self {
            kind: kind.into(),
            amount,
            meta: None,
        }
    }

    /// Attach metadata, replacing any previous value.
    #[must_use]
    pub fn with_meta(mut self, meta: ItemMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Set a custom display name, creating metadata if needed.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.meta.get_or_insert_with(ItemMeta::default).display_name = Some(name.into());
        self
    }

    /// True for the explicitly-typed "nothing" kind or a zero-sized stack.
    #[must_use]
    pub fn is_air(&self) -> bool {
        self.kind == AIR || self.amount == 0
    }

    /// What: Host similarity predicate.
    ///
    /// Inputs:
    /// - `other`: Stack to compare with
    ///
    /// Output:
    /// - `true` when both stacks have the same kind and identical metadata
    ///
    /// Details:
    /// - Amounts are ignored, so two partial stacks of the same item are similar.
    #[must_use]
    pub fn is_similar(&self, other: &Self) -> bool {
        self.kind == other.kind && self.meta == other.meta
    }

    /// Read a tag value from the metadata, if any.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.meta.as_ref()?.tags.get(key).map(String::as_str)
    }
}

/// True when the slot holds a real (non-air) stack.
#[must_use]
pub fn is_occupied(slot: &Slot) -> bool {
    slot.as_ref().is_some_and(|stack| !stack.is_air())
}

/// What: Count occupied entries in a slot sequence.
///
/// Inputs:
/// - `slots`: Sequence to inspect
///
/// Output:
/// - Number of entries that are neither empty nor air
#[must_use]
pub fn occupied_count(slots: &[Slot]) -> usize {
    slots.iter().filter(|slot| is_occupied(slot)).count()
}
