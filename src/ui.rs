//! Grid-UI engine.
//!
//! A [`GridView`] is a titled slot grid with per-slot bindings, a lifecycle
//! (`Uninitialized -> Open -> Closed`) and a debounce window. Concrete screens
//! implement [`Screen`]; a per-actor [`Session`] registers open views, routes host
//! interactions to them and runs deferred render/close requests on each tick.

mod event;
mod grid;
pub mod icons;
mod scheduler;
mod screen;
pub mod screens;
mod session;

pub use event::{ClickEvent, ClickKind, Disposition};
pub use grid::{DEBOUNCE_WINDOW_MS, Debounce, Frame, GridView, MAX_SLOTS, SlotBinding, ViewId, ViewState};
pub use scheduler::{DeferredTask, Scheduler};
pub use screen::{ActiveScreen, FollowUp, Handled, Reply, Screen, UiContext};
pub use session::Session;
