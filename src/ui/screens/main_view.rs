use crate::config::ConfigStore;
use crate::container::{Container, ROW_SLOTS, carrier_id, find_backward, find_forward};
use crate::error::{Result, SatchelError};
use crate::host::{Actor, Feedback};
use crate::permissions::{self, Permission};
use crate::ui::event::ClickEvent;
use crate::ui::grid::{GridView, ViewId};
use crate::ui::icons;
use crate::ui::screen::{Reply, Screen, UiContext};
use crate::ui::session::Session;
use crate::util::Clock;

use super::customizer::CustomizerView;

/// Control-row buttons of the main view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainAction {
    /// Jump to the first carrier in the inventory.
    First,
    /// Jump to the previous carrier.
    Previous,
    /// Close the view.
    Close,
    /// Open the customizer.
    Customize,
    /// Jump to the next carrier.
    Next,
    /// Jump to the last carrier.
    Last,
}

impl MainAction {
    /// Position of each button within the control row.
    const LAYOUT: [(usize, Self); 6] = [
        (0, Self::First),
        (1, Self::Previous),
        (2, Self::Close),
        (4, Self::Customize),
        (7, Self::Next),
        (8, Self::Last),
    ];
}

/// What: Storage screen showing a container's slots above a navigation row.
///
/// Details:
/// - Grid size is the container capacity plus one control row.
/// - Content slots accept normal host interaction; the close hook writes them back.
#[derive(Debug)]
pub struct MainView {
    grid: GridView<MainAction>,
    container: Container,
    bypass: bool,
}

impl MainView {
    /// What: Check the actor may open `container`, stamp the open time, build the screen.
    ///
    /// Output:
    /// - `Ok(None)` when the permission gate denies access (the actor was told why)
    ///
    /// # Errors
    /// - `InvalidState` when the actor is offline
    /// - `InvalidArgument` when the title is blank
    pub fn build(
        mut container: Container,
        actor: &mut dyn Actor,
        config: &ConfigStore,
        clock: &dyn Clock,
        bypass_permission: bool,
    ) -> Result<Option<Self>> {
        if !actor.is_online() {
            return Err(SatchelError::invalid_state(format!(
                "actor '{}' is not online",
                actor.name()
            )));
        }
        if !bypass_permission && !permissions::check(actor, config, Permission::OpenContainers) {
            return Ok(None);
        }
        container.touch_last_opened(clock.now_millis());
        let size = container.capacity() + ROW_SLOTS;
        let grid = GridView::new(actor.name(), container.display_name(), size)?;
        Ok(Some(Self {
            grid,
            container,
            bypass: bypass_permission,
        }))
    }

    /// The container being shown.
    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    fn control_row(&self) -> usize {
        self.container.capacity()
    }

    /// Copy the content slots back into the container.
    fn sync_items(&mut self) -> Result<()> {
        let capacity = self.container.capacity();
        let items = self.grid.contents()[..capacity].to_vec();
        self.container.set_items(items)
    }

    /// What: Resolve a navigation button to the carrier index to open, if any.
    fn target(&self, action: MainAction, actor: &dyn Actor) -> Result<Option<usize>> {
        let inventory = actor.inventory();
        let here = self.container.locate_slot(actor)?;
        Ok(match action {
            MainAction::First => find_forward(inventory, 0),
            MainAction::Last => find_backward(inventory, inventory.len()),
            MainAction::Next => find_forward(inventory, here.map_or(0, |i| i + 1)),
            MainAction::Previous => match here {
                Some(0) | None => None,
                Some(i) => find_backward(inventory, i - 1),
            },
            MainAction::Customize | MainAction::Close => None,
        })
    }

    fn navigate(&mut self, action: MainAction, ctx: &mut UiContext<'_>) -> Result<Reply> {
        let Some(index) = self.target(action, &*ctx.actor)? else {
            return Ok(Reply::cancel());
        };
        let same = ctx
            .actor
            .inventory()
            .get(index)
            .and_then(carrier_id)
            .is_some_and(|id| id == self.container.id());
        if same {
            return Ok(Reply::cancel());
        }
        let next = Container::from_inventory_slot(ctx.actor, index, ctx.config, ctx.clock)?;
        tracing::debug!(from = %self.container.id(), to = %next.id(), slot = index, "[MainView] Navigating");
        match Self::build(next, ctx.actor, ctx.config, ctx.clock, self.bypass)? {
            Some(view) => Ok(Reply::open(view)),
            None => Ok(Reply::cancel()),
        }
    }
}

impl Screen for MainView {
    type Action = MainAction;

    fn grid(&self) -> &GridView<MainAction> {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut GridView<MainAction> {
        &mut self.grid
    }

    fn refresh(&mut self, _ctx: &mut UiContext<'_>) -> Result<()> {
        let capacity = self.container.capacity();
        for index in 0..capacity {
            let slot = self.container.items().get(index).cloned().flatten();
            self.grid.set_slot(index, slot);
        }
        let row = self.control_row();
        for offset in 0..ROW_SLOTS {
            self.grid.set_slot(row + offset, Some(icons::filler()));
        }
        for (offset, action) in MainAction::LAYOUT {
            let icon = match action {
                MainAction::First => icons::button("spectral_arrow", "First backpack", &[]),
                MainAction::Previous => icons::button("arrow", "Previous backpack", &[]),
                MainAction::Close => icons::button("barrier", "Close", &[]),
                MainAction::Customize => {
                    icons::button("crafting_table", "Customize", &self.container.lore())
                }
                MainAction::Next => icons::button("arrow", "Next backpack", &[]),
                MainAction::Last => icons::button("spectral_arrow", "Last backpack", &[]),
            };
            self.grid.bind(row + offset, icon, action)?;
        }
        Ok(())
    }

    fn on_action(
        &mut self,
        action: MainAction,
        _event: &ClickEvent,
        ctx: &mut UiContext<'_>,
    ) -> Result<Reply> {
        if let Some(reply) = close_if_carrier_missing(&self.container, ctx) {
            return Ok(reply);
        }
        match action {
            MainAction::Close => Ok(Reply::close()),
            MainAction::Customize => {
                self.sync_items()?;
                let view =
                    CustomizerView::new(self.container.clone(), ctx.actor.name(), self.bypass)?;
                Ok(Reply::open(view))
            }
            _ => self.navigate(action, ctx),
        }
    }

    fn on_default_click(&mut self, event: &ClickEvent, ctx: &mut UiContext<'_>) -> Reply {
        if let Some(reply) = close_if_carrier_missing(&self.container, ctx) {
            return reply;
        }
        match event.slot {
            Some(index) if index >= self.control_row() && index < self.grid.size() => {
                Reply::cancel()
            }
            _ => Reply::allow(),
        }
    }

    fn on_close(&mut self, ctx: &mut UiContext<'_>) -> Result<()> {
        self.sync_items()?;
        if !self.container.save(ctx.actor)? {
            tracing::warn!(id = %self.container.id(), "[MainView] Carrier moved before close; contents not saved");
        }
        Ok(())
    }
}

/// What: Close the view when the container's carrier has left the actor's storage.
///
/// Output:
/// - `Some(close reply)` after telling the actor; `None` while the carrier is still held
///
/// Details:
/// - Checked on every interaction; the close-time save needs the carrier in storage.
pub(super) fn close_if_carrier_missing(
    container: &Container,
    ctx: &mut UiContext<'_>,
) -> Option<Reply> {
    if matches!(container.locate_slot(&*ctx.actor), Ok(Some(_))) {
        return None;
    }
    tracing::debug!(id = %container.id(), actor = ctx.actor.name(), "[Grid] Carrier left the inventory; closing view");
    ctx.actor.notify(Feedback::failure(
        "Your backpack is no longer in your inventory.",
    ));
    Some(Reply::close())
}

impl Container {
    /// What: Show this container to its owner.
    ///
    /// Inputs:
    /// - `bypass_permission`: Skip the open-containers gate (admin or scripted opens)
    ///
    /// Output:
    /// - Id of the new view, or `None` when the permission gate denied access
    ///
    /// Details:
    /// - Stamps `last_opened_at`; the render happens on the session's next tick.
    ///
    /// # Errors
    /// - `InvalidState` when the actor is offline
    pub fn open_main_view(
        self,
        session: &mut Session,
        ctx: &mut UiContext<'_>,
        bypass_permission: bool,
    ) -> Result<Option<ViewId>> {
        let Some(view) = MainView::build(self, ctx.actor, ctx.config, ctx.clock, bypass_permission)?
        else {
            return Ok(None);
        };
        session.open(Box::new(view), ctx).map(Some)
    }

    /// What: Show the customizer for this container.
    ///
    /// # Errors
    /// - `InvalidState` when the actor is offline
    pub fn open_customizer_view(
        self,
        session: &mut Session,
        ctx: &mut UiContext<'_>,
    ) -> Result<ViewId> {
        if !ctx.actor.is_online() {
            return Err(SatchelError::invalid_state(format!(
                "actor '{}' is not online",
                ctx.actor.name()
            )));
        }
        let view = CustomizerView::new(self, ctx.actor.name(), false)?;
        session.open(Box::new(view), ctx)
    }
}
