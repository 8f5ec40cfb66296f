//! Shared harness for integration tests: temp config, manual clock, in-memory actor,
//! a session and a renderer that records every host call.

#![allow(dead_code)]

use satchel::config::ConfigStore;
use satchel::container::{Container, blank_carrier};
use satchel::host::{Actor, GridRenderer, SimpleActor};
use satchel::permissions::Permission;
use satchel::ui::{ClickEvent, DEBOUNCE_WINDOW_MS, Disposition, Frame, Session, UiContext, ViewId};
use satchel::util::ManualClock;

/// Start time of every harness clock.
pub const T0: i64 = 1_700_000_000_000;

/// One host call observed by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCall {
    /// A frame was drawn.
    Render(ViewId, String),
    /// A view was closed.
    Close(ViewId),
}

/// Renderer keeping every call plus the last frame drawn.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<HostCall>,
    pub last_frame: Option<Frame>,
}

impl GridRenderer for RecordingRenderer {
    fn render(&mut self, _actor: &dyn Actor, frame: &Frame) {
        self.calls
            .push(HostCall::Render(frame.view, frame.title.clone()));
        self.last_frame = Some(frame.clone());
    }

    fn close(&mut self, _actor: &dyn Actor, view: ViewId) {
        self.calls.push(HostCall::Close(view));
    }
}

/// Everything a test needs to drive screens end to end.
pub struct Harness {
    pub dir: tempfile::TempDir,
    pub config: ConfigStore,
    pub clock: ManualClock,
    pub actor: SimpleActor,
    pub session: Session,
    pub renderer: RecordingRenderer,
}

impl Harness {
    /// What: Fresh harness for actor "alex" holding every permission node.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ConfigStore::open(dir.path().join("config.yml")).expect("config");
        let mut actor = SimpleActor::new("alex");
        for permission in Permission::ALL {
            actor.grant(permission.node());
        }
        Self {
            dir,
            config,
            clock: ManualClock::new(T0),
            actor,
            session: Session::new("alex"),
            renderer: RecordingRenderer::default(),
        }
    }

    /// Run `f` with a context borrowing the harness collaborators.
    pub fn with_ctx<R>(&mut self, f: impl FnOnce(&mut Session, &mut UiContext<'_>) -> R) -> R {
        let mut ctx = UiContext::new(&mut self.actor, &mut self.config, &self.clock);
        f(&mut self.session, &mut ctx)
    }

    /// Run one host tick.
    pub fn tick(&mut self) {
        let mut ctx = UiContext::new(&mut self.actor, &mut self.config, &self.clock);
        self.session.tick(&mut ctx, &mut self.renderer);
    }

    /// Deliver `event` without touching the clock.
    pub fn dispatch(&mut self, event: &ClickEvent) -> Disposition {
        self.with_ctx(|session, ctx| session.dispatch(event, ctx))
    }

    /// Left-click `slot` of `view` after the debounce window has passed.
    pub fn click(&mut self, view: ViewId, slot: usize) -> Disposition {
        self.clock.advance(DEBOUNCE_WINDOW_MS);
        self.dispatch(&ClickEvent::left(view, "alex", slot))
    }

    /// Put a blank carrier into `slot` of the actor's storage.
    pub fn give_carrier(&mut self, slot: usize) {
        self.actor.inventory_mut().set(slot, Some(blank_carrier()));
    }

    /// Load the container carried at `slot`.
    pub fn load(&mut self, slot: usize) -> Container {
        Container::from_inventory_slot(&mut self.actor, slot, &self.config, &self.clock)
            .expect("container")
    }

    /// Re-read the container carried at `slot` without stamping.
    pub fn reload(&self, slot: usize) -> Container {
        let carrier = self.actor.inventory().get(slot).cloned().expect("carrier");
        Container::from_carrier(&self.actor, &carrier, &self.config, &self.clock).expect("container")
    }

    /// Open the main view of the container at `slot` and run the deferred render.
    pub fn open_main(&mut self, slot: usize) -> ViewId {
        let container = self.load(slot);
        let view = self
            .with_ctx(|session, ctx| container.open_main_view(session, ctx, false))
            .expect("open")
            .expect("permitted");
        self.tick();
        view
    }

    /// Id of the most recently rendered view.
    pub fn rendered_view(&self) -> ViewId {
        self.renderer.last_frame.as_ref().expect("frame").view
    }
}
