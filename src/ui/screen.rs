use std::fmt;

use crate::config::ConfigStore;
use crate::error::Result;
use crate::host::Actor;
use crate::item::Slot;
use crate::util::Clock;

use super::event::{ClickEvent, ClickKind, Disposition};
use super::grid::{Frame, GridView, ViewId, ViewState};

/// Collaborators a screen may touch while handling an event.
pub struct UiContext<'a> {
    /// Actor the session belongs to.
    pub actor: &'a mut dyn Actor,
    /// Process config store.
    pub config: &'a mut ConfigStore,
    /// Time source for debounce and container timestamps.
    pub clock: &'a dyn Clock,
}

impl<'a> UiContext<'a> {
    /// Bundle the collaborators for one dispatch or tick.
    pub fn new(actor: &'a mut dyn Actor, config: &'a mut ConfigStore, clock: &'a dyn Clock) -> Self {
        Self {
            actor,
            config,
            clock,
        }
    }
}

/// Navigation a screen asks its session to perform after an action.
pub enum FollowUp {
    /// Replace this view with another screen.
    Open(Box<dyn ActiveScreen>),
    /// Close this view.
    Close,
}

impl fmt::Debug for FollowUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(screen) => f.debug_tuple("Open").field(&screen.id()).finish(),
            Self::Close => f.write_str("Close"),
        }
    }
}

/// What: Outcome of one routed interaction.
///
/// Details:
/// - `cancel` decides whether the host interaction is suppressed.
#[derive(Debug)]
pub struct Reply {
    /// Suppress the host's default handling.
    pub cancel: bool,
    /// Optional navigation.
    pub follow_up: Option<FollowUp>,
}

impl Reply {
    /// Suppress the interaction.
    #[must_use]
    pub const fn cancel() -> Self {
        Self {
            cancel: true,
            follow_up: None,
        }
    }

    /// Let the interaction through.
    #[must_use]
    pub const fn allow() -> Self {
        Self {
            cancel: false,
            follow_up: None,
        }
    }

    /// Suppress the interaction and open `screen` in place of this view.
    #[must_use]
    pub fn open(screen: impl ActiveScreen + 'static) -> Self {
        Self {
            cancel: true,
            follow_up: Some(FollowUp::Open(Box::new(screen))),
        }
    }

    /// Suppress the interaction and close this view.
    #[must_use]
    pub const fn close() -> Self {
        Self {
            cancel: true,
            follow_up: Some(FollowUp::Close),
        }
    }
}

/// What: A concrete screen built on a [`GridView`].
///
/// Details:
/// - Implementors provide the hooks; the routing, gatekeeping and lifecycle live in the
///   blanket [`ActiveScreen`] implementation.
pub trait Screen {
    /// Value bound to a slot and handed back on click.
    type Action: Copy + fmt::Debug;

    /// The underlying grid.
    fn grid(&self) -> &GridView<Self::Action>;

    /// Mutable access to the underlying grid.
    fn grid_mut(&mut self) -> &mut GridView<Self::Action>;

    /// Populate bound slots. Called once on open and again whenever the screen wants.
    ///
    /// # Errors
    /// - Any error from building icons or reading the actor
    fn refresh(&mut self, ctx: &mut UiContext<'_>) -> Result<()>;

    /// Handle a click on a bound slot.
    ///
    /// # Errors
    /// - Caller bugs surfaced by the container or config layer
    fn on_action(
        &mut self,
        action: Self::Action,
        event: &ClickEvent,
        ctx: &mut UiContext<'_>,
    ) -> Result<Reply>;

    /// Handle a click that has no binding.
    fn on_default_click(&mut self, event: &ClickEvent, _ctx: &mut UiContext<'_>) -> Reply {
        match event.slot {
            Some(index) if index < self.grid().size() => Reply::cancel(),
            _ if is_shift(event.kind) => Reply::cancel(),
            _ => Reply::allow(),
        }
    }

    /// Persist side effects once the host confirmed the view closed.
    ///
    /// # Errors
    /// - Whatever the persistence step fails with; teardown continues regardless
    fn on_close(&mut self, _ctx: &mut UiContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Result of [`ActiveScreen::handle`].
#[derive(Debug)]
pub struct Handled {
    /// What the host should do with the interaction.
    pub disposition: Disposition,
    /// Navigation requested by the screen.
    pub follow_up: Option<FollowUp>,
}

impl Handled {
    const fn plain(disposition: Disposition) -> Self {
        Self {
            disposition,
            follow_up: None,
        }
    }
}

/// Object-safe engine view of any [`Screen`], stored by a session.
pub trait ActiveScreen {
    /// View identifier.
    fn id(&self) -> ViewId;
    /// Owning actor name.
    fn viewer(&self) -> &str;
    /// Lifecycle state.
    fn state(&self) -> ViewState;
    /// Render snapshot.
    fn frame(&self) -> Frame;
    /// Current grid contents.
    fn contents(&self) -> &[Slot];
    /// Mutable grid contents.
    fn contents_mut(&mut self) -> &mut [Slot];

    /// What: Transition `Uninitialized -> Open` and populate bound slots.
    ///
    /// # Errors
    /// - `InvalidState` when the view was already opened
    fn open(&mut self, ctx: &mut UiContext<'_>) -> Result<()>;

    /// What: Gatekeep and route one interaction.
    ///
    /// # Errors
    /// - Errors raised by the screen's action handler
    fn handle(&mut self, event: &ClickEvent, ctx: &mut UiContext<'_>) -> Result<Handled>;

    /// What: Run the close hook and drop every binding. Safe to call more than once.
    fn teardown(&mut self, ctx: &mut UiContext<'_>);
}

fn is_shift(kind: ClickKind) -> bool {
    matches!(kind, ClickKind::ShiftLeft | ClickKind::ShiftRight)
}

impl<S: Screen> ActiveScreen for S {
    fn id(&self) -> ViewId {
        self.grid().id()
    }

    fn viewer(&self) -> &str {
        self.grid().viewer()
    }

    fn state(&self) -> ViewState {
        self.grid().state()
    }

    fn frame(&self) -> Frame {
        self.grid().frame()
    }

    fn contents(&self) -> &[Slot] {
        self.grid().contents()
    }

    fn contents_mut(&mut self) -> &mut [Slot] {
        self.grid_mut().contents_mut()
    }

    fn open(&mut self, ctx: &mut UiContext<'_>) -> Result<()> {
        self.grid_mut().mark_open()?;
        self.refresh(ctx)
    }

    fn handle(&mut self, event: &ClickEvent, ctx: &mut UiContext<'_>) -> Result<Handled> {
        let grid = self.grid();
        if event.view != grid.id()
            || event.actor != grid.viewer()
            || event.actor != ctx.actor.name()
            || grid.state() != ViewState::Open
        {
            return Ok(Handled::plain(Disposition::Ignored));
        }
        if event.kind == ClickKind::SwapOffhand {
            ctx.actor.inventory_mut().set_offhand(None);
            return Ok(Handled::plain(Disposition::Cancelled));
        }
        if event.kind == ClickKind::Drag {
            return Ok(Handled::plain(Disposition::Cancelled));
        }
        if event.touches_carrier(ctx.actor.inventory()) {
            tracing::debug!(view = %event.view, "[Grid] Interaction with a container carrier suppressed");
            return Ok(Handled::plain(Disposition::Cancelled));
        }
        let now = ctx.clock.now_millis();
        if !self.grid_mut().admit(now) {
            tracing::trace!(view = %event.view, "[Grid] Debounced");
            return Ok(Handled::plain(Disposition::Cancelled));
        }
        let bound = event.slot.and_then(|index| self.grid().action_at(index));
        let reply = match bound {
            Some(action) => {
                tracing::debug!(view = %event.view, action = ?action, "[Grid] Routing action");
                self.on_action(action, event, ctx)?
            }
            None => self.on_default_click(event, ctx),
        };
        Ok(Handled {
            disposition: Disposition::from_cancel(reply.cancel),
            follow_up: reply.follow_up,
        })
    }

    fn teardown(&mut self, ctx: &mut UiContext<'_>) {
        if self.grid().state() == ViewState::Closed {
            return;
        }
        if let Err(err) = self.on_close(ctx) {
            tracing::warn!(view = %self.grid().id(), error = %err, "[Grid] Close hook failed");
        }
        self.grid_mut().mark_closed();
        tracing::debug!(view = %self.grid().id(), "[Grid] Torn down");
    }
}
