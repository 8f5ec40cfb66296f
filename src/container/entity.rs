use crate::codec;
use crate::config::ConfigStore;
use crate::error::{Result, SatchelError};
use crate::host::Actor;
use crate::item::{ItemMeta, ItemStack, Slot, is_occupied, occupied_count};
use crate::util::Clock;

use super::carrier::{self, CONTAINER_TAG, Representation, fields};
use super::types::{Color, Tier};

/// Values written into a representation the first time a field is missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerDefaults {
    /// Display name.
    pub name: String,
    /// Palette entry.
    pub color: Color,
    /// Capacity tier.
    pub tier: Tier,
    /// Codec blob of the initial contents.
    pub contents_blob: String,
    /// Creation timestamp, epoch ms.
    pub created_at: i64,
}

impl ContainerDefaults {
    /// What: Snapshot the configured defaults, stamping `now` as creation time.
    #[must_use]
    pub fn from_config(config: &ConfigStore, now: i64) -> Self {
        Self {
            name: config.default_name(),
            color: config.default_color(),
            tier: config.default_tier(),
            contents_blob: config.default_contents_blob(),
            created_at: now,
        }
    }
}

/// One storage container owned by one actor.
///
/// The typed fields are a materialized view of `raw`, the representation embedded in
/// the carrier. Every setter writes `raw` and then runs [`Container::reconcile`], which
/// re-derives everything from scratch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    owner: String,
    carrier_kind: String,
    raw: Representation,
    defaults: ContainerDefaults,
    id: String,
    display_name: String,
    color: Color,
    tier: Tier,
    items: Vec<Slot>,
    created_at: i64,
    last_opened_at: i64,
    overflow: Option<Vec<Slot>>,
}

impl Container {
    /// What: Materialize the container stored on `carrier` for `actor`.
    ///
    /// Inputs:
    /// - `actor`: Owner; must have a non-blank name
    /// - `carrier`: Stack holding the representation; must carry metadata
    /// - `config`: Source of defaults for absent fields
    /// - `clock`: Creation timestamp source for new containers
    ///
    /// Output:
    /// - Reconciled container; a blank carrier yields a new container with a fresh id
    ///
    /// # Errors
    /// - `InvalidArgument` when the actor name is blank or the carrier has no metadata
    pub fn from_carrier(
        actor: &dyn Actor,
        carrier: &ItemStack,
        config: &ConfigStore,
        clock: &dyn Clock,
    ) -> Result<Self> {
        if actor.name().trim().is_empty() {
            return Err(SatchelError::invalid_argument("actor is required"));
        }
        if carrier.meta.is_none() {
            return Err(SatchelError::invalid_argument(
                "carrier has no attached metadata",
            ));
        }
        let mut raw = carrier::read_representation(carrier);
        let id = match raw.get(fields::ID).filter(|id| !id.trim().is_empty()) {
            Some(id) => id.clone(),
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                raw.insert(fields::ID.to_string(), id.clone());
                tracing::debug!(id = %id, actor = actor.name(), "[Container] Assigned new id");
                id
            }
        };
        let defaults = ContainerDefaults::from_config(config, clock.now_millis());
        let mut container = Self {
            owner: actor.name().to_string(),
            carrier_kind: carrier.kind.clone(),
            raw,
            id,
            display_name: defaults.name.clone(),
            color: defaults.color,
            tier: defaults.tier,
            items: Vec::new(),
            created_at: defaults.created_at,
            last_opened_at: -1,
            overflow: None,
            defaults,
        };
        container.reconcile();
        Ok(container)
    }

    /// What: Materialize the container carried at `index` and stamp the carrier.
    ///
    /// Inputs:
    /// - `actor`: Owner holding the carrier
    /// - `index`: Storage slot of the carrier
    ///
    /// Output:
    /// - Reconciled container; the carrier is rewritten so later saves can find it by id
    ///
    /// # Errors
    /// - `InvalidState` when the actor is offline
    /// - `InvalidArgument` when the slot holds no carrier
    pub fn from_inventory_slot(
        actor: &mut dyn Actor,
        index: usize,
        config: &ConfigStore,
        clock: &dyn Clock,
    ) -> Result<Self> {
        if !actor.is_online() {
            return Err(SatchelError::invalid_state(format!(
                "actor '{}' is not online",
                actor.name()
            )));
        }
        let carrier = actor
            .inventory()
            .get(index)
            .filter(|stack| carrier::is_carrier(stack))
            .cloned()
            .ok_or_else(|| {
                SatchelError::invalid_argument(format!("slot {index} holds no container carrier"))
            })?;
        let container = Self::from_carrier(&*actor, &carrier, config, clock)?;
        actor
            .inventory_mut()
            .set(index, Some(container.present_on(carrier)));
        Ok(container)
    }

    /// What: Fill absent fields with defaults, re-derive typed fields, enforce capacity.
    ///
    /// Details:
    /// - Idempotent: a second call without an intervening write changes nothing.
    /// - If occupied entries exceed the tier, the sequence is cut to the tier's slot
    ///   count and the uncut list is kept in `overflow` (never restored automatically).
    /// - An over-long sequence whose occupied entries still fit is compacted instead.
    pub fn reconcile(&mut self) {
        let d = &self.defaults;
        let seeds = [
            (fields::NAME, d.name.clone()),
            (fields::COLOR, d.color.key().to_string()),
            (fields::TIER, d.tier.key().to_string()),
            (fields::CONTENTS, d.contents_blob.clone()),
            (fields::CREATED, d.created_at.to_string()),
            (fields::LAST_OPENED, "-1".to_string()),
        ];
        for (key, value) in seeds {
            self.raw.entry(key.to_string()).or_insert(value);
        }

        self.display_name = self.field(fields::NAME).to_string();
        self.color = Color::from_key(self.field(fields::COLOR)).unwrap_or(self.defaults.color);
        self.tier = Tier::from_key(self.field(fields::TIER)).unwrap_or(self.defaults.tier);
        self.items = codec::decode(self.field(fields::CONTENTS));
        self.created_at = self
            .field(fields::CREATED)
            .parse()
            .unwrap_or(self.defaults.created_at);
        self.last_opened_at = self.field(fields::LAST_OPENED).parse().unwrap_or(-1);
        self.overflow = self
            .raw
            .get(fields::UNCUT_CONTENTS)
            .map(|blob| codec::decode(blob))
            .filter(|uncut| !uncut.is_empty());

        let capacity = self.tier.slots();
        if self.items.len() > capacity {
            if occupied_count(&self.items) > capacity {
                tracing::warn!(
                    id = %self.id,
                    occupied = occupied_count(&self.items),
                    capacity,
                    "[Container] Contents exceed capacity; truncating and keeping overflow"
                );
                self.raw.insert(
                    fields::UNCUT_CONTENTS.to_string(),
                    codec::encode(&self.items),
                );
                self.overflow = Some(self.items.clone());
                self.items.truncate(capacity);
            } else {
                compact(&mut self.items, capacity);
            }
            self.raw
                .insert(fields::CONTENTS.to_string(), codec::encode(&self.items));
        }
    }

    fn field(&self, key: &str) -> &str {
        self.raw.get(key).map_or("", String::as_str)
    }

    fn write(&mut self, key: &str, value: String) {
        self.raw.insert(key.to_string(), value);
        self.reconcile();
    }

    /// What: Rename the container.
    ///
    /// # Errors
    /// - `InvalidArgument` when `name` is blank
    pub fn set_display_name(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(SatchelError::invalid_argument("display name is required"));
        }
        self.write(fields::NAME, name.to_string());
        Ok(())
    }

    /// Change the color.
    pub fn set_color(&mut self, color: Color) {
        self.write(fields::COLOR, color.key().to_string());
    }

    /// What: Change the capacity tier.
    ///
    /// Details:
    /// - Lowering the tier below the occupied count truncates and fills `overflow`.
    /// - Raising it never touches `overflow`.
    pub fn set_capacity_tier(&mut self, tier: Tier) {
        self.write(fields::TIER, tier.key().to_string());
    }

    /// What: Replace the contents.
    ///
    /// Inputs:
    /// - `items`: New slots; may be longer than the tier if the extra entries are empty
    ///
    /// # Errors
    /// - `CapacityExceeded` when occupied entries exceed the current tier; nothing is written
    pub fn set_items(&mut self, mut items: Vec<Slot>) -> Result<()> {
        let occupied = occupied_count(&items);
        let capacity = self.capacity();
        if occupied > capacity {
            return Err(SatchelError::CapacityExceeded { occupied, capacity });
        }
        compact(&mut items, capacity);
        self.write(fields::CONTENTS, codec::encode(&items));
        Ok(())
    }

    /// Record an open at `now`.
    pub fn touch_last_opened(&mut self, now: i64) {
        self.write(fields::LAST_OPENED, now.to_string());
    }

    /// True when a larger tier exists.
    #[must_use]
    pub fn can_expand(&self) -> bool {
        self.tier.next().is_some()
    }

    /// What: Move to the next tier.
    ///
    /// Output:
    /// - `false` (no change) at the largest tier
    ///
    /// Details:
    /// - Costs are validated and consumed by the caller.
    pub fn expand(&mut self) -> bool {
        let Some(next) = self.tier.next() else {
            return false;
        };
        self.set_capacity_tier(next);
        tracing::info!(id = %self.id, tier = next.key(), "[Container] Expanded");
        true
    }

    /// What: Find this container's carrier in the actor's inventory.
    ///
    /// Output:
    /// - Storage index of the carrier with a matching id, if any
    ///
    /// # Errors
    /// - `InvalidState` when the actor is offline
    pub fn locate_slot(&self, actor: &dyn Actor) -> Result<Option<usize>> {
        if !actor.is_online() {
            return Err(SatchelError::invalid_state(format!(
                "actor '{}' is not online",
                actor.name()
            )));
        }
        let inventory = actor.inventory();
        Ok((0..inventory.len()).find(|&i| {
            inventory
                .get(i)
                .and_then(carrier::carrier_id)
                .is_some_and(|id| id == self.id)
        }))
    }

    /// What: Write the container back into its carrier.
    ///
    /// Output:
    /// - `true` when the carrier was rewritten; `false` when it was not found
    ///   (moved or dropped since opening), which is not an error
    ///
    /// # Errors
    /// - `InvalidState` when the actor is offline
    pub fn save(&self, actor: &mut dyn Actor) -> Result<bool> {
        let Some(index) = self.locate_slot(actor)? else {
            tracing::debug!(id = %self.id, actor = actor.name(), "[Container] Carrier not found; save skipped");
            return Ok(false);
        };
        let base = actor
            .inventory()
            .get(index)
            .cloned()
            .unwrap_or_else(|| ItemStack::new(self.carrier_kind.clone(), 1));
        let rebuilt = self.present_on(base);
        actor.inventory_mut().set(index, Some(rebuilt));
        tracing::debug!(id = %self.id, slot = index, "[Container] Saved");
        Ok(true)
    }

    /// What: Rebuild a carrier's presentation and embedded representation.
    ///
    /// Inputs:
    /// - `base`: Stack to rewrite (kind and amount are kept)
    ///
    /// Output:
    /// - Carrier with name, lore, texture and the container tag refreshed
    #[must_use]
    pub fn present_on(&self, mut base: ItemStack) -> ItemStack {
        let mut meta = base.meta.take().unwrap_or_else(ItemMeta::default);
        meta.display_name = Some(self.display_name.clone());
        meta.lore = self.lore();
        meta.texture = Some(self.color.texture());
        match serde_json::to_string(&self.raw) {
            Ok(json) => {
                meta.tags.insert(CONTAINER_TAG.to_string(), json);
            }
            Err(err) => {
                tracing::error!(id = %self.id, error = %err, "[Container] Could not serialize representation");
            }
        }
        base.meta = Some(meta);
        base
    }

    /// Descriptive lines shown on the carrier.
    #[must_use]
    pub fn lore(&self) -> Vec<String> {
        vec![
            format!("Color: {}", self.color.friendly_name()),
            format!(
                "Size: {} ({} slots)",
                self.tier.friendly_name(),
                self.capacity()
            ),
            format!("Contents: {}/{}", self.occupied(), self.capacity()),
        ]
    }

    /// Unique id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the owning actor.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Palette entry.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Capacity tier.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Slot count of the current tier.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.tier.slots()
    }

    /// Current slots (never longer than [`Self::capacity`]).
    #[must_use]
    pub fn items(&self) -> &[Slot] {
        &self.items
    }

    /// Occupied entries in [`Self::items`].
    #[must_use]
    pub fn occupied(&self) -> usize {
        occupied_count(&self.items)
    }

    /// Creation time, epoch ms.
    #[must_use]
    pub const fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Last open time, epoch ms, or `-1` when never opened.
    #[must_use]
    pub const fn last_opened_at(&self) -> i64 {
        self.last_opened_at
    }

    /// Slots that were cut off by a capacity truncation, kept for manual recovery.
    #[must_use]
    pub fn overflow(&self) -> Option<&[Slot]> {
        self.overflow.as_deref()
    }

    /// Raw persisted fields.
    #[must_use]
    pub const fn representation(&self) -> &Representation {
        &self.raw
    }
}

/// What: Shrink `items` to `capacity` without losing occupied entries.
///
/// Details:
/// - Non-occupied entries are dropped from the back first; order of occupied entries is kept.
/// - Callers guarantee the occupied count fits.
fn compact(items: &mut Vec<Slot>, capacity: usize) {
    let mut index = items.len();
    while items.len() > capacity && index > 0 {
        index -= 1;
        if !is_occupied(&items[index]) {
            items.remove(index);
        }
    }
}
