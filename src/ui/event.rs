use crate::container::{is_carrier, slot_is_carrier};
use crate::item::{Inventory, Slot};

use super::grid::ViewId;

/// Kind of gesture the host reports for a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickKind {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Primary button with shift held.
    ShiftLeft,
    /// Secondary button with shift held.
    ShiftRight,
    /// Middle button.
    Middle,
    /// Number key swapping with a hotbar slot.
    NumberKey(u8),
    /// Swap-hands key; reserved and never routed.
    SwapOffhand,
    /// Drop key.
    Drop,
    /// Drag spreading the cursor stack over several slots; always cancelled.
    Drag,
    /// Anything else the host can deliver.
    Other,
}

/// One interaction delivered by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    /// View the host believes was clicked.
    pub view: ViewId,
    /// Actor who clicked.
    pub actor: String,
    /// Raw slot index; indices past the grid are the actor's own inventory, `None` is outside.
    pub slot: Option<usize>,
    /// Gesture.
    pub kind: ClickKind,
    /// Stack in the clicked slot before the interaction.
    pub current: Slot,
    /// Stack on the cursor before the interaction.
    pub cursor: Slot,
}

impl ClickEvent {
    /// What: Build a plain left click on `slot` with empty hands.
    #[must_use]
    pub fn left(view: ViewId, actor: impl Into<String>, slot: usize) -> Self {
        Self {
            view,
            actor: actor.into(),
            slot: Some(slot),
            kind: ClickKind::Left,
            current: None,
            cursor: None,
        }
    }

    /// Replace the gesture.
    #[must_use]
    pub const fn with_kind(mut self, kind: ClickKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace the cursor stack.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Slot) -> Self {
        self.cursor = cursor;
        self
    }

    /// Replace the clicked stack.
    #[must_use]
    pub fn with_current(mut self, current: Slot) -> Self {
        self.current = current;
        self
    }

    /// Hotbar index a number-key swap pulls its stack from.
    #[must_use]
    pub fn hotbar_button(&self) -> Option<usize> {
        match self.kind {
            ClickKind::NumberKey(n) => Some(usize::from(n)),
            _ => None,
        }
    }

    /// What: True when any stack the interaction would move is a container carrier.
    ///
    /// Inputs:
    /// - `inventory`: The clicking actor's storage, consulted for number-key swaps
    #[must_use]
    pub fn touches_carrier(&self, inventory: &Inventory) -> bool {
        let swapped = self
            .hotbar_button()
            .and_then(|index| inventory.get(index))
            .is_some_and(is_carrier);
        swapped || slot_is_carrier(&self.current) || slot_is_carrier(&self.cursor)
    }
}

/// What the host should do with an interaction after dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Not for this session or view; host handles it normally.
    Ignored,
    /// Let the host apply its default handling.
    Allowed,
    /// Cancel the interaction so the grid is not mutated.
    Cancelled,
}

impl Disposition {
    /// True when the host must cancel the underlying interaction.
    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Map a callback's "cancel" answer.
    #[must_use]
    pub const fn from_cancel(cancel: bool) -> Self {
        if cancel { Self::Cancelled } else { Self::Allowed }
    }
}
