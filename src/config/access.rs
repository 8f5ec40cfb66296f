use std::collections::BTreeMap;

use serde_norway::Value;

use super::ConfigStore;
use super::schema::{DEFAULT_COLOR, DEFAULT_NAME, DEFAULT_TIER};
use crate::codec;
use crate::container::{Color, Tier};
use crate::error::Result;
use crate::item::{ItemStack, Slot};
use crate::permissions::Permission;

/// Crafting recipe as stored in config; registering it is up to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipe {
    /// Grid rows, one character per cell.
    pub shape: Vec<String>,
    /// Item kind for each shape character.
    pub ingredients: BTreeMap<char, String>,
}

/// Typed accessors. Enum-like values that fail to parse fall back to the built-in
/// default instead of failing.
impl ConfigStore {
    /// Display name for new containers.
    #[must_use]
    pub fn default_name(&self) -> String {
        self.get_str("defaults.name")
            .map_or_else(|| DEFAULT_NAME.to_string(), str::to_string)
    }

    /// Color for new containers; unknown names fall back to brown.
    #[must_use]
    pub fn default_color(&self) -> Color {
        let raw = self.get_str("defaults.color");
        raw.and_then(Color::from_key).unwrap_or_else(|| {
            tracing::warn!(value = ?raw, "[Config] Unknown default color; using fallback");
            DEFAULT_COLOR
        })
    }

    /// Tier for new containers; unknown names fall back to the smallest tier.
    #[must_use]
    pub fn default_tier(&self) -> Tier {
        let raw = self.get_str("defaults.tier");
        raw.and_then(Tier::from_key).unwrap_or_else(|| {
            tracing::warn!(value = ?raw, "[Config] Unknown default tier; using fallback");
            DEFAULT_TIER
        })
    }

    /// Raw codec blob of the default contents.
    #[must_use]
    pub fn default_contents_blob(&self) -> String {
        self.get_str("defaults.contents")
            .map_or_else(codec::empty_blob, str::to_string)
    }

    /// Decoded default contents.
    #[must_use]
    pub fn default_contents(&self) -> Vec<Slot> {
        codec::decode(&self.default_contents_blob())
    }

    /// What: Materials required to expand into `tier`.
    ///
    /// Output:
    /// - Non-empty stacks of the configured list; empty for the smallest tier or a missing key
    #[must_use]
    pub fn expansion_cost(&self, tier: Tier) -> Vec<ItemStack> {
        self.get_str(&tier.cost_key())
            .map(codec::decode)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter(|stack| !stack.is_air())
            .collect()
    }

    /// Whether `permission` must be held; a missing or non-boolean value means required.
    #[must_use]
    pub fn permission_required(&self, permission: Permission) -> bool {
        self.get_bool(&permission.config_key()).unwrap_or(true)
    }

    /// What: Crafting recipe.
    ///
    /// Details:
    /// - Ingredient keys longer than one character are ignored.
    #[must_use]
    pub fn recipe(&self) -> Recipe {
        let shape = self
            .get("recipe.shape")
            .and_then(Value::as_sequence)
            .map(|rows| {
                rows.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let mut ingredients = BTreeMap::new();
        if let Some(map) = self.get("recipe.ingredients").and_then(Value::as_mapping) {
            for (key, value) in map {
                let (Some(key), Some(kind)) = (key.as_str(), value.as_str()) else {
                    continue;
                };
                let mut chars = key.chars();
                if let (Some(symbol), None) = (chars.next(), chars.next()) {
                    ingredients.insert(symbol, kind.to_string());
                }
            }
        }
        Recipe { shape, ingredients }
    }

    /// Persist a new display name for new containers.
    ///
    /// # Errors
    /// - `PersistenceFailure` when the flush fails
    pub fn set_default_name(&mut self, name: &str) -> Result<()> {
        self.set("defaults.name", Value::String(name.to_string()))
    }

    /// Persist a new default color.
    ///
    /// # Errors
    /// - `PersistenceFailure` when the flush fails
    pub fn set_default_color(&mut self, color: Color) -> Result<()> {
        self.set("defaults.color", Value::String(color.key().to_string()))
    }

    /// Persist a new default tier.
    ///
    /// # Errors
    /// - `PersistenceFailure` when the flush fails
    pub fn set_default_tier(&mut self, tier: Tier) -> Result<()> {
        self.set("defaults.tier", Value::String(tier.key().to_string()))
    }

    /// Persist new default contents.
    ///
    /// # Errors
    /// - `PersistenceFailure` when the flush fails
    pub fn set_default_contents(&mut self, items: &[Slot]) -> Result<()> {
        self.set("defaults.contents", Value::String(codec::encode(items)))
    }

    /// Persist the materials required to expand into `tier`.
    ///
    /// # Errors
    /// - `PersistenceFailure` when the flush fails
    pub fn set_expansion_cost(&mut self, tier: Tier, cost: &[ItemStack]) -> Result<()> {
        let slots: Vec<Slot> = cost.iter().cloned().map(Some).collect();
        self.set(&tier.cost_key(), Value::String(codec::encode(&slots)))
    }

    /// Persist whether `permission` must be held.
    ///
    /// # Errors
    /// - `PersistenceFailure` when the flush fails
    pub fn set_permission_required(&mut self, permission: Permission, required: bool) -> Result<()> {
        self.set(&permission.config_key(), Value::Bool(required))
    }
}
