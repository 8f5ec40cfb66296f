use serde_norway::{Mapping, Value};

use super::ConfigStore;
use crate::codec;
use crate::container::{Color, Tier};
use crate::item::ItemStack;
use crate::permissions::Permission;

/// Default display name for new containers.
pub const DEFAULT_NAME: &str = "Backpack";
/// Default palette entry for new containers.
pub const DEFAULT_COLOR: Color = Color::Brown;
/// Default capacity tier for new containers.
pub const DEFAULT_TIER: Tier = Tier::Small;

/// What: Built-in value for every key of the config schema.
///
/// Output:
/// - `(key path, value)` pairs in document order
///
/// Details:
/// - Item lists (expansion costs, default contents) are codec blobs.
/// - The crafting ingredient map is a single entry so user-defined letters are never
///   mixed with the stock ones.
#[must_use]
pub fn default_entries() -> Vec<(String, Value)> {
    let mut entries: Vec<(String, Value)> = Vec::new();

    let shape = ["LLL", "LCL", "LLL"]
        .iter()
        .map(|row| Value::String((*row).to_string()))
        .collect();
    entries.push(("recipe.shape".to_string(), Value::Sequence(shape)));
    let mut ingredients = Mapping::new();
    ingredients.insert(
        Value::String("L".to_string()),
        Value::String("leather".to_string()),
    );
    ingredients.insert(
        Value::String("C".to_string()),
        Value::String("chest".to_string()),
    );
    entries.push(("recipe.ingredients".to_string(), Value::Mapping(ingredients)));

    for tier in Tier::ALL.into_iter().skip(1) {
        let blob = codec::encode(&default_expansion_cost(tier));
        entries.push((tier.cost_key(), Value::String(blob)));
    }

    entries.push((
        "defaults.name".to_string(),
        Value::String(DEFAULT_NAME.to_string()),
    ));
    entries.push((
        "defaults.color".to_string(),
        Value::String(DEFAULT_COLOR.key().to_string()),
    ));
    entries.push((
        "defaults.tier".to_string(),
        Value::String(DEFAULT_TIER.key().to_string()),
    ));
    entries.push((
        "defaults.contents".to_string(),
        Value::String(codec::empty_blob()),
    ));

    for permission in Permission::ALL {
        entries.push((permission.config_key(), Value::Bool(true)));
    }
    entries
}

/// Stock materials for expanding into `tier`.
fn default_expansion_cost(tier: Tier) -> Vec<Option<ItemStack>> {
    let leather = u32::try_from(tier.ordinal() * 8).unwrap_or(u32::MAX);
    let extra = match tier {
        Tier::Small | Tier::Medium => None,
        Tier::Large => Some(ItemStack::new("iron_ingot", 4)),
        Tier::Huge => Some(ItemStack::new("gold_ingot", 8)),
        Tier::Giant => Some(ItemStack::new("diamond", 4)),
    };
    std::iter::once(Some(ItemStack::new("leather", leather)))
        .chain(extra.map(Some))
        .collect()
}

/// What: Insert every missing schema key with its built-in default.
///
/// Inputs:
/// - `store`: Store to heal in place
///
/// Output:
/// - Number of keys inserted; the store is marked dirty when this is non-zero
///
/// Details:
/// - Existing values are never touched, so running it twice inserts nothing the second time.
pub fn ensure_defaults(store: &mut ConfigStore) -> usize {
    let mut inserted = 0;
    for (key, value) in default_entries() {
        if store.insert_default(&key, value) {
            tracing::debug!(key = %key, "[Config] Healed missing key");
            inserted += 1;
        }
    }
    inserted
}
