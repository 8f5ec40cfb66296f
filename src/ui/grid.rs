use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::container::ROW_SLOTS;
use crate::error::{Result, SatchelError};
use crate::item::{ItemStack, Slot};

/// Largest grid a host can show.
pub const MAX_SLOTS: usize = 54;

/// Minimum time between two processed interactions on one view.
pub const DEBOUNCE_WINDOW_MS: i64 = 250;

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of one grid view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Lifecycle of a view. `Closed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Built, bindings may be registered, not shown yet.
    Uninitialized,
    /// Receiving events.
    Open,
    /// Torn down.
    Closed,
}

/// Presentation item and action bound to one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotBinding<A> {
    /// Item drawn in the slot.
    pub icon: ItemStack,
    /// Action routed to the screen when the slot is clicked.
    pub action: A,
}

/// Snapshot of a view handed to the host renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// View being drawn.
    pub view: ViewId,
    /// Grid title.
    pub title: String,
    /// One entry per grid slot.
    pub slots: Vec<Slot>,
}

/// What: Rate limiter admitting at most one interaction per window.
///
/// Details:
/// - The first interaction always passes; later ones pass once `window_ms` has elapsed
///   since the last one that passed. Suppressed interactions do not move the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debounce {
    window_ms: i64,
    last_ms: Option<i64>,
}

impl Debounce {
    /// Limiter with the given window.
    #[must_use]
    pub const fn new(window_ms: i64) -> Self {
        Self {
            window_ms,
            last_ms: None,
        }
    }

    /// Admit or reject an interaction at `now_ms`, updating the window on admission.
    pub fn admit(&mut self, now_ms: i64) -> bool {
        if let Some(last) = self.last_ms
            && now_ms - last < self.window_ms
        {
            return false;
        }
        self.last_ms = Some(now_ms);
        true
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW_MS)
    }
}

/// Generic slot grid: title, contents, per-slot bindings, lifecycle and debounce.
///
/// Screens own one `GridView` each; the engine in [`crate::ui::ActiveScreen`] drives it.
#[derive(Clone, Debug)]
pub struct GridView<A> {
    id: ViewId,
    viewer: String,
    title: String,
    state: ViewState,
    contents: Vec<Slot>,
    bindings: BTreeMap<usize, SlotBinding<A>>,
    debounce: Debounce,
}

impl<A: Copy> GridView<A> {
    /// What: Create an unopened grid for `viewer`.
    ///
    /// Inputs:
    /// - `viewer`: Name of the actor the grid belongs to
    /// - `title`: Non-blank title
    /// - `size`: Slot count; a positive multiple of 9 up to [`MAX_SLOTS`]
    ///
    /// # Errors
    /// - `InvalidArgument` for a blank viewer or title, or an unsupported size
    pub fn new(viewer: &str, title: &str, size: usize) -> Result<Self> {
        if viewer.trim().is_empty() {
            return Err(SatchelError::invalid_argument("grid viewer is required"));
        }
        if title.trim().is_empty() {
            return Err(SatchelError::invalid_argument("grid title must not be blank"));
        }
        if size == 0 || size % ROW_SLOTS != 0 || size > MAX_SLOTS {
            return Err(SatchelError::invalid_argument(format!(
                "grid size {size} is not a positive multiple of {ROW_SLOTS} up to {MAX_SLOTS}"
            )));
        }
        Ok(Self {
            id: ViewId::next(),
            viewer: viewer.to_string(),
            title: title.to_string(),
            state: ViewState::Uninitialized,
            contents: vec![None; size],
            bindings: BTreeMap::new(),
            debounce: Debounce::default(),
        })
    }

    /// What: Bind `action` to `index`, drawing `icon` there.
    ///
    /// Details:
    /// - Replaces any earlier binding at `index`.
    ///
    /// # Errors
    /// - `InvalidArgument` when `index` is outside the grid
    pub fn bind(&mut self, index: usize, icon: ItemStack, action: A) -> Result<()> {
        let Some(target) = self.contents.get_mut(index) else {
            return Err(SatchelError::invalid_argument(format!(
                "slot {index} is outside a grid of {}",
                self.size()
            )));
        };
        *target = Some(icon.clone());
        self.bindings.insert(index, SlotBinding { icon, action });
        Ok(())
    }

    /// Action bound at `index`.
    #[must_use]
    pub fn action_at(&self, index: usize) -> Option<A> {
        self.bindings.get(&index).map(|b| b.action)
    }

    /// Drop every binding (contents are left as drawn).
    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }

    /// Number of bound slots.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> ViewId {
        self.id
    }

    /// Owning actor name.
    #[must_use]
    pub fn viewer(&self) -> &str {
        &self.viewer
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Slot count.
    #[must_use]
    pub fn size(&self) -> usize {
        self.contents.len()
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ViewState {
        self.state
    }

    /// Drawn contents, one entry per slot.
    #[must_use]
    pub fn contents(&self) -> &[Slot] {
        &self.contents
    }

    /// Mutable contents; hosts apply allowed interactions here.
    pub fn contents_mut(&mut self) -> &mut [Slot] {
        &mut self.contents
    }

    /// Overwrite one slot without binding it; out-of-range indices are ignored.
    pub fn set_slot(&mut self, index: usize, slot: Slot) {
        if let Some(target) = self.contents.get_mut(index) {
            *target = slot;
        }
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn frame(&self) -> Frame {
        Frame {
            view: self.id,
            title: self.title.clone(),
            slots: self.contents.clone(),
        }
    }

    pub(crate) fn mark_open(&mut self) -> Result<()> {
        match self.state {
            ViewState::Uninitialized => {
                self.state = ViewState::Open;
                Ok(())
            }
            ViewState::Open => Err(SatchelError::invalid_state(format!(
                "{} is already open",
                self.id
            ))),
            ViewState::Closed => Err(SatchelError::invalid_state(format!(
                "{} was closed and cannot be reopened",
                self.id
            ))),
        }
    }

    pub(crate) fn mark_closed(&mut self) {
        self.state = ViewState::Closed;
        self.bindings.clear();
    }

    pub(crate) fn admit(&mut self, now_ms: i64) -> bool {
        self.debounce.admit(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates_title_and_size() {
        assert!(GridView::<u8>::new("alex", "Bag", 27).is_ok());
        assert!(GridView::<u8>::new("alex", "Bag", 54).is_ok());
        for bad in [0, 10, 63] {
            assert!(matches!(
                GridView::<u8>::new("alex", "Bag", bad),
                Err(SatchelError::InvalidArgument(_))
            ));
        }
        assert!(matches!(
            GridView::<u8>::new("alex", "  ", 9),
            Err(SatchelError::InvalidArgument(_))
        ));
    }

    #[test]
    fn bind_overwrites_and_checks_bounds() {
        let mut grid = GridView::new("alex", "Bag", 9).expect("grid");
        grid.bind(4, ItemStack::new("arrow", 1), 1_u8).expect("bind");
        grid.bind(4, ItemStack::new("barrier", 1), 2_u8).expect("rebind");
        assert_eq!(grid.action_at(4), Some(2));
        assert_eq!(grid.binding_count(), 1);
        assert_eq!(grid.contents()[4], Some(ItemStack::new("barrier", 1)));
        assert!(matches!(
            grid.bind(9, ItemStack::new("arrow", 1), 3),
            Err(SatchelError::InvalidArgument(_))
        ));
    }

    #[test]
    fn open_is_single_use() {
        let mut grid = GridView::<u8>::new("alex", "Bag", 9).expect("grid");
        grid.mark_open().expect("first open");
        assert!(matches!(grid.mark_open(), Err(SatchelError::InvalidState(_))));
        grid.mark_closed();
        assert!(matches!(grid.mark_open(), Err(SatchelError::InvalidState(_))));
    }

    #[test]
    /// What: Only interactions spaced by the full window pass.
    fn debounce_window() {
        let mut d = Debounce::default();
        assert!(d.admit(1_000));
        assert!(!d.admit(1_100));
        assert!(!d.admit(1_249));
        assert!(d.admit(1_250));
        assert!(!d.admit(1_300));
    }

    #[test]
    fn view_ids_are_unique() {
        let a = GridView::<u8>::new("alex", "A", 9).expect("grid");
        let b = GridView::<u8>::new("alex", "B", 9).expect("grid");
        assert_ne!(a.id(), b.id());
    }
}
