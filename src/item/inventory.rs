use super::{ItemStack, Slot, is_occupied};

/// Number of leading storage slots that make up the hotbar.
pub const HOTBAR_SIZE: usize = 9;

/// An actor's private storage: main slots, the secondary hand and the cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: Vec<Slot>,
    offhand: Slot,
    cursor: Slot,
}

impl Inventory {
    /// What: Create an empty inventory with `size` storage slots.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
            offhand: None,
            cursor: None,
        }
    }

    /// All storage slots, hotbar first.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of storage slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the inventory has no storage slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Stack at `index`, `None` when empty or out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// What: Replace the slot at `index`.
    ///
    /// Output:
    /// - `false` when `index` is out of range (nothing is written)
    pub fn set(&mut self, index: usize, slot: Slot) -> bool {
        match self.slots.get_mut(index) {
            Some(target) => {
                *target = slot;
                true
            }
            None => false,
        }
    }

    /// The first [`HOTBAR_SIZE`] slots.
    #[must_use]
    pub fn hotbar(&self) -> &[Slot] {
        &self.slots[..HOTBAR_SIZE.min(self.slots.len())]
    }

    /// Secondary hand slot.
    #[must_use]
    pub const fn offhand(&self) -> &Slot {
        &self.offhand
    }

    /// Replace the secondary hand slot.
    pub fn set_offhand(&mut self, slot: Slot) {
        self.offhand = slot;
    }

    /// Stack currently held on the cursor.
    #[must_use]
    pub const fn cursor(&self) -> &Slot {
        &self.cursor
    }

    /// Replace the cursor stack.
    pub fn set_cursor(&mut self, slot: Slot) {
        self.cursor = slot;
    }

    /// What: Remove one unit from the cursor stack.
    ///
    /// Output:
    /// - `false` when the cursor is empty
    ///
    /// Details:
    /// - The cursor becomes empty once its last unit is taken.
    pub fn take_one_from_cursor(&mut self) -> bool {
        let Some(stack) = self.cursor.as_mut() else {
            return false;
        };
        if stack.amount <= 1 {
            self.cursor = None;
        } else {
            stack.amount -= 1;
        }
        true
    }

    /// What: Total units of stacks similar to `sample` across storage slots.
    #[must_use]
    pub fn count_similar(&self, sample: &ItemStack) -> u64 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| !stack.is_air() && stack.is_similar(sample))
            .map(|stack| u64::from(stack.amount))
            .sum()
    }

    /// What: Check whether the inventory covers every requirement.
    ///
    /// Inputs:
    /// - `requirements`: Stacks whose amounts must be available
    ///
    /// Output:
    /// - `true` when, for each distinct item, the summed units over all similar stacks
    ///   is at least the summed requirement for that item
    ///
    /// Details:
    /// - Requirements naming the same item are merged before comparing, so two entries of
    ///   eight leather need sixteen leather in total.
    #[must_use]
    pub fn contains_all(&self, requirements: &[ItemStack]) -> bool {
        merge_requirements(requirements)
            .iter()
            .all(|need| self.count_similar(need) >= u64::from(need.amount))
    }

    /// What: Remove every requirement from storage slots.
    ///
    /// Output:
    /// - `false` (and nothing removed) when [`Self::contains_all`] fails
    ///
    /// Details:
    /// - Units are drained front to back, emptying slots that reach zero.
    pub fn remove_all(&mut self, requirements: &[ItemStack]) -> bool {
        if !self.contains_all(requirements) {
            return false;
        }
        for need in merge_requirements(requirements) {
            let mut remaining = need.amount;
            for slot in &mut self.slots {
                if remaining == 0 {
                    break;
                }
                let Some(stack) = slot.as_mut() else {
                    continue;
                };
                if stack.is_air() || !stack.is_similar(&need) {
                    continue;
                }
                let taken = stack.amount.min(remaining);
                stack.amount -= taken;
                remaining -= taken;
                if stack.amount == 0 {
                    *slot = None;
                }
            }
        }
        true
    }

    /// What: Put a stack into the first empty storage slot.
    ///
    /// Output:
    /// - Index used, or `None` when storage is full
    pub fn add(&mut self, stack: ItemStack) -> Option<usize> {
        let index = self.slots.iter().position(|slot| !is_occupied(slot))?;
        self.slots[index] = Some(stack);
        Some(index)
    }
}

fn merge_requirements(requirements: &[ItemStack]) -> Vec<ItemStack> {
    let mut merged: Vec<ItemStack> = Vec::new();
    for need in requirements.iter().filter(|need| !need.is_air()) {
        match merged.iter_mut().find(|m| m.is_similar(need)) {
            Some(existing) => existing.amount = existing.amount.saturating_add(need.amount),
            None => merged.push(need.clone()),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked() -> Inventory {
        let mut inv = Inventory::new(36);
        inv.set(0, Some(ItemStack::new("leather", 5)));
        inv.set(4, Some(ItemStack::new("leather", 6)));
        inv.set(9, Some(ItemStack::new("iron_ingot", 2)));
        inv
    }

    #[test]
    /// What: Aggregate availability spans several stacks of the same item.
    fn contains_all_sums_across_stacks() {
        let inv = stocked();
        assert!(inv.contains_all(&[ItemStack::new("leather", 11)]));
        assert!(!inv.contains_all(&[ItemStack::new("leather", 12)]));
    }

    #[test]
    /// What: Duplicate requirements share one running total.
    fn duplicate_requirements_are_merged() {
        let inv = stocked();
        let reqs = [ItemStack::new("leather", 6), ItemStack::new("leather", 6)];
        assert!(!inv.contains_all(&reqs));
        let reqs = [ItemStack::new("leather", 5), ItemStack::new("leather", 6)];
        assert!(inv.contains_all(&reqs));
    }

    #[test]
    fn remove_all_drains_front_to_back() {
        let mut inv = stocked();
        assert!(inv.remove_all(&[
            ItemStack::new("leather", 7),
            ItemStack::new("iron_ingot", 2)
        ]));
        assert_eq!(inv.get(0), None);
        assert_eq!(inv.get(4).map(|s| s.amount), Some(4));
        assert_eq!(inv.get(9), None);
    }

    #[test]
    fn remove_all_is_atomic_when_short() {
        let mut inv = stocked();
        let before = inv.clone();
        assert!(!inv.remove_all(&[
            ItemStack::new("leather", 2),
            ItemStack::new("diamond", 1)
        ]));
        assert_eq!(inv, before);
    }

    #[test]
    fn cursor_consumption_empties_last_unit() {
        let mut inv = Inventory::new(9);
        inv.set_cursor(Some(ItemStack::new("red_dye", 2)));
        assert!(inv.take_one_from_cursor());
        assert_eq!(inv.cursor().as_ref().map(|s| s.amount), Some(1));
        assert!(inv.take_one_from_cursor());
        assert!(inv.cursor().is_none());
        assert!(!inv.take_one_from_cursor());
    }
}
