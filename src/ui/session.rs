use std::collections::BTreeMap;

use crate::error::{Result, SatchelError};
use crate::host::GridRenderer;
use crate::item::Slot;

use super::event::{ClickEvent, Disposition};
use super::grid::{ViewId, ViewState};
use super::scheduler::{DeferredTask, Scheduler};
use super::screen::{ActiveScreen, FollowUp, UiContext};

/// What: Per-actor registry of grid views plus the deferred-task queue.
///
/// Details:
/// - A view is registered for events between [`Session::open`] and host-confirmed close.
/// - Render and close requests are deferred to the next [`Session::tick`].
pub struct Session {
    viewer: String,
    views: BTreeMap<ViewId, Box<dyn ActiveScreen>>,
    scheduler: Scheduler,
}

impl Session {
    /// Empty session for the actor named `viewer`.
    #[must_use]
    pub fn new(viewer: impl Into<String>) -> Self {
        Self {
            viewer: viewer.into(),
            views: BTreeMap::new(),
            scheduler: Scheduler::new(),
        }
    }

    /// Actor this session belongs to.
    #[must_use]
    pub fn viewer(&self) -> &str {
        &self.viewer
    }

    /// What: Open `screen`, replacing any view that is currently open.
    ///
    /// Inputs:
    /// - `screen`: Unopened screen built for this session's actor
    /// - `ctx`: Collaborators used by the refresh hook
    ///
    /// Output:
    /// - Id of the registered view; its render request runs on the next tick
    ///
    /// # Errors
    /// - `InvalidArgument` when the screen belongs to another actor
    /// - `InvalidState` when the actor is offline or the screen was already opened
    pub fn open(
        &mut self,
        mut screen: Box<dyn ActiveScreen>,
        ctx: &mut UiContext<'_>,
    ) -> Result<ViewId> {
        if screen.viewer() != self.viewer || ctx.actor.name() != self.viewer {
            return Err(SatchelError::invalid_argument(format!(
                "screen for '{}' cannot open in the session of '{}'",
                screen.viewer(),
                self.viewer
            )));
        }
        if !ctx.actor.is_online() {
            return Err(SatchelError::invalid_state(format!(
                "actor '{}' is not online",
                self.viewer
            )));
        }
        screen.open(ctx)?;
        let open: Vec<ViewId> = self
            .views
            .iter()
            .filter(|(_, view)| view.state() == ViewState::Open)
            .map(|(id, _)| *id)
            .collect();
        for id in open {
            self.close(id);
        }
        let id = screen.id();
        self.views.insert(id, screen);
        self.scheduler.submit(DeferredTask::Render(id));
        tracing::debug!(actor = %self.viewer, view = %id, "[Session] Opened view");
        Ok(id)
    }

    /// What: Deliver a host interaction.
    ///
    /// Output:
    /// - [`Disposition::Ignored`] when no registered view matches
    ///
    /// Details:
    /// - Handler errors are logged and the interaction is cancelled.
    pub fn dispatch(&mut self, event: &ClickEvent, ctx: &mut UiContext<'_>) -> Disposition {
        if event.actor != self.viewer {
            return Disposition::Ignored;
        }
        let Some(screen) = self.views.get_mut(&event.view) else {
            return Disposition::Ignored;
        };
        let handled = match screen.handle(event, ctx) {
            Ok(handled) => handled,
            Err(err) => {
                tracing::warn!(view = %event.view, error = %err, "[Session] Action failed");
                return Disposition::Cancelled;
            }
        };
        match handled.follow_up {
            Some(FollowUp::Open(next)) => {
                if let Err(err) = self.open(next, ctx) {
                    tracing::warn!(view = %event.view, error = %err, "[Session] Follow-up open failed");
                }
            }
            Some(FollowUp::Close) => {
                self.close(event.view);
            }
            None => {}
        }
        handled.disposition
    }

    /// What: Request the host close `view` on the next tick.
    ///
    /// Output:
    /// - `false` when the view is not registered as open
    pub fn close(&mut self, view: ViewId) -> bool {
        let open = self
            .views
            .get(&view)
            .is_some_and(|screen| screen.state() == ViewState::Open);
        if open {
            self.scheduler.submit(DeferredTask::Close(view));
        }
        open
    }

    /// What: Host confirmation that `view` is gone; runs the close hook and deregisters.
    ///
    /// Details:
    /// - Unknown or already-removed views are a no-op.
    pub fn confirm_closed(&mut self, view: ViewId, ctx: &mut UiContext<'_>) {
        if let Some(mut screen) = self.views.remove(&view) {
            screen.teardown(ctx);
            tracing::debug!(actor = %self.viewer, view = %view, "[Session] Closed view");
        }
    }

    /// What: Run the deferred tasks queued before this call.
    ///
    /// Details:
    /// - A render is skipped when the view is no longer open.
    /// - When the actor is offline host calls are skipped, but close tasks still tear
    ///   the view down.
    /// - `GridRenderer::close` returning counts as the host confirming the close.
    pub fn tick(&mut self, ctx: &mut UiContext<'_>, renderer: &mut dyn GridRenderer) {
        let online = ctx.actor.is_online();
        for task in self.scheduler.drain() {
            match task {
                DeferredTask::Render(view) => {
                    let Some(screen) = self
                        .views
                        .get(&view)
                        .filter(|screen| screen.state() == ViewState::Open)
                    else {
                        continue;
                    };
                    if online {
                        renderer.render(&*ctx.actor, &screen.frame());
                    } else {
                        tracing::debug!(view = %view, "[Session] Actor offline; render dropped");
                    }
                }
                DeferredTask::Close(view) => {
                    if online {
                        renderer.close(&*ctx.actor, view);
                    } else {
                        tracing::debug!(view = %view, "[Session] Actor offline; tearing down without host close");
                    }
                    self.confirm_closed(view, ctx);
                }
            }
        }
    }

    /// Registered view, if any.
    #[must_use]
    pub fn view(&self, view: ViewId) -> Option<&dyn ActiveScreen> {
        self.views.get(&view).map(|screen| &**screen)
    }

    /// Mutable grid contents of `view`; hosts apply allowed interactions here.
    pub fn contents_mut(&mut self, view: ViewId) -> Option<&mut [Slot]> {
        self.views.get_mut(&view).map(|screen| screen.contents_mut())
    }

    /// Id of the view currently open, if any.
    #[must_use]
    pub fn current(&self) -> Option<ViewId> {
        self.views
            .iter()
            .filter(|(_, screen)| screen.state() == ViewState::Open)
            .map(|(id, _)| *id)
            .next_back()
    }

    /// Registered views (open or awaiting close).
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Deferred tasks waiting for the next tick.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }
}
