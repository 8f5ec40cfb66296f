use unicode_width::UnicodeWidthStr;

use crate::container::{CARRIER_KIND, Color, Container};
use crate::error::Result;
use crate::host::Feedback;
use crate::item::Inventory;
use crate::permissions::{self, Permission};
use crate::ui::event::{ClickEvent, ClickKind};
use crate::ui::grid::GridView;
use crate::ui::icons;
use crate::ui::screen::{Reply, Screen, UiContext};
use crate::util::ms_to_date;

use super::main_view::{MainView, close_if_carrier_missing};

/// Widest display name accepted by the rename action, in terminal columns.
pub const MAX_NAME_WIDTH: usize = 32;

/// Item kind the rename action reads the new name from.
pub const NAME_TAG_KIND: &str = "name_tag";

const SIZE: usize = 27;

/// What: Read the name written on the name tag held on the cursor.
///
/// Output:
/// - The trimmed name, or the message explaining why it cannot be used
///
/// Details:
/// - Names wider than [`MAX_NAME_WIDTH`] columns are refused.
pub(super) fn held_name(inventory: &Inventory) -> std::result::Result<String, String> {
    let name = inventory
        .cursor()
        .as_ref()
        .filter(|stack| stack.kind == NAME_TAG_KIND)
        .and_then(|stack| stack.meta.as_ref())
        .and_then(|meta| meta.display_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let Some(name) = name else {
        return Err("Hold a named name tag on your cursor.".to_string());
    };
    if name.width() > MAX_NAME_WIDTH {
        return Err(format!("That name is too long (max {MAX_NAME_WIDTH})."));
    }
    Ok(name.to_string())
}
const PREVIEW_SLOT: usize = 4;

/// Customizer buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomizeAction {
    /// Recolor with the dye held on the cursor.
    Dye,
    /// Rename with the name tag held on the cursor.
    Rename,
    /// Pay the configured cost and move to the next tier.
    Expand,
    /// Return to the main view.
    Back,
    /// Close the view.
    Close,
}

impl CustomizeAction {
    const LAYOUT: [(usize, Self); 5] = [
        (0, Self::Close),
        (11, Self::Dye),
        (13, Self::Rename),
        (15, Self::Expand),
        (22, Self::Back),
    ];
}

/// Screen for recoloring, renaming and expanding one container.
#[derive(Debug)]
pub struct CustomizerView {
    grid: GridView<CustomizeAction>,
    container: Container,
    bypass: bool,
}

impl CustomizerView {
    /// What: Build an unopened customizer for `container`.
    ///
    /// Inputs:
    /// - `viewer`: Actor name the view belongs to
    /// - `bypass`: Carried to the main view opened by the back button
    ///
    /// # Errors
    /// - `InvalidArgument` when `viewer` is blank
    pub fn new(container: Container, viewer: &str, bypass: bool) -> Result<Self> {
        let title = format!("Customize {}", container.display_name());
        Ok(Self {
            grid: GridView::new(viewer, &title, SIZE)?,
            container,
            bypass,
        })
    }

    /// The container being customized.
    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    /// What: Persist a successful change, tell the actor, redraw.
    fn commit(&mut self, ctx: &mut UiContext<'_>, message: String) -> Result<Reply> {
        if !self.container.save(ctx.actor)? {
            tracing::warn!(id = %self.container.id(), "[Customizer] Carrier not found; change kept in view only");
        }
        ctx.actor.notify(Feedback::success(message));
        self.refresh(ctx)?;
        Ok(Reply::cancel())
    }

    fn dye(&mut self, ctx: &mut UiContext<'_>) -> Result<Reply> {
        if !permissions::check(ctx.actor, ctx.config, Permission::Recolor) {
            return Ok(Reply::cancel());
        }
        let held = ctx.actor.inventory().cursor().as_ref().map(|s| s.kind.clone());
        let Some(color) = held.as_deref().and_then(Color::from_dye) else {
            ctx.actor
                .notify(Feedback::failure("Hold a dye on your cursor to recolor."));
            return Ok(Reply::cancel());
        };
        if color == self.container.color() {
            ctx.actor.notify(Feedback::failure(format!(
                "This backpack is already {}.",
                color.friendly_name()
            )));
            return Ok(Reply::cancel());
        }
        self.container.set_color(color);
        ctx.actor.inventory_mut().take_one_from_cursor();
        tracing::info!(id = %self.container.id(), color = color.key(), "[Customizer] Recolored");
        self.commit(ctx, format!("Backpack dyed {}.", color.friendly_name()))
    }

    fn rename(&mut self, ctx: &mut UiContext<'_>) -> Result<Reply> {
        if !permissions::check(ctx.actor, ctx.config, Permission::Rename) {
            return Ok(Reply::cancel());
        }
        let name = match held_name(ctx.actor.inventory()) {
            Ok(name) => name,
            Err(message) => {
                ctx.actor.notify(Feedback::failure(message));
                return Ok(Reply::cancel());
            }
        };
        self.container.set_display_name(&name)?;
        ctx.actor.inventory_mut().take_one_from_cursor();
        tracing::info!(id = %self.container.id(), name = %name, "[Customizer] Renamed");
        self.commit(ctx, format!("Backpack renamed to {name}."))
    }

    fn expand(&mut self, ctx: &mut UiContext<'_>) -> Result<Reply> {
        if !permissions::check(ctx.actor, ctx.config, Permission::Expand) {
            return Ok(Reply::cancel());
        }
        let Some(next) = self.container.tier().next() else {
            ctx.actor
                .notify(Feedback::failure("This backpack is already at its largest size."));
            return Ok(Reply::cancel());
        };
        let cost = ctx.config.expansion_cost(next);
        if !ctx.actor.inventory_mut().remove_all(&cost) {
            let mut message = String::from("You need ");
            message.push_str(&icons::item_lines(&cost).join(", "));
            message.push_str(" to expand.");
            ctx.actor.notify(Feedback::failure(message));
            return Ok(Reply::cancel());
        }
        self.container.expand();
        self.commit(
            ctx,
            format!(
                "Backpack expanded to {} ({} slots).",
                next.friendly_name(),
                next.slots()
            ),
        )
    }
}

impl Screen for CustomizerView {
    type Action = CustomizeAction;

    fn grid(&self) -> &GridView<CustomizeAction> {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut GridView<CustomizeAction> {
        &mut self.grid
    }

    fn refresh(&mut self, ctx: &mut UiContext<'_>) -> Result<()> {
        for index in 0..SIZE {
            self.grid.set_slot(index, Some(icons::filler()));
        }
        let mut lore = self.container.lore();
        lore.push(format!("Created: {}", ms_to_date(self.container.created_at())));
        lore.push(format!(
            "Last opened: {}",
            ms_to_date(self.container.last_opened_at())
        ));
        let mut preview = icons::button(CARRIER_KIND, self.container.display_name(), &lore);
        if let Some(meta) = preview.meta.as_mut() {
            meta.texture = Some(self.container.color().texture());
        }
        self.grid.set_slot(PREVIEW_SLOT, Some(preview));

        let expand_lore = match self.container.tier().next() {
            Some(next) => {
                let mut lore = vec![format!(
                    "Next: {} ({} slots)",
                    next.friendly_name(),
                    next.slots()
                )];
                lore.push("Cost:".to_string());
                lore.extend(icons::item_lines(&ctx.config.expansion_cost(next)));
                lore
            }
            None => vec!["Already at the largest size".to_string()],
        };
        for (slot, action) in CustomizeAction::LAYOUT {
            let icon = match action {
                CustomizeAction::Dye => icons::button(
                    &self.container.color().dye_kind(),
                    "Recolor",
                    &["Hold a dye on your cursor and click".to_string()],
                ),
                CustomizeAction::Rename => icons::button(
                    NAME_TAG_KIND,
                    "Rename",
                    &["Hold a named name tag on your cursor and click".to_string()],
                ),
                CustomizeAction::Expand => icons::button("chest", "Expand", &expand_lore),
                CustomizeAction::Back => icons::button("arrow", "Back", &[]),
                CustomizeAction::Close => icons::button("barrier", "Close", &[]),
            };
            self.grid.bind(slot, icon, action)?;
        }
        Ok(())
    }

    fn on_action(
        &mut self,
        action: CustomizeAction,
        _event: &ClickEvent,
        ctx: &mut UiContext<'_>,
    ) -> Result<Reply> {
        if let Some(reply) = close_if_carrier_missing(&self.container, ctx) {
            return Ok(reply);
        }
        match action {
            CustomizeAction::Close => Ok(Reply::close()),
            CustomizeAction::Dye => self.dye(ctx),
            CustomizeAction::Rename => self.rename(ctx),
            CustomizeAction::Expand => self.expand(ctx),
            CustomizeAction::Back => {
                let main = MainView::build(
                    self.container.clone(),
                    ctx.actor,
                    ctx.config,
                    ctx.clock,
                    self.bypass,
                )?;
                Ok(main.map_or_else(Reply::cancel, Reply::open))
            }
        }
    }

    fn on_default_click(&mut self, event: &ClickEvent, ctx: &mut UiContext<'_>) -> Reply {
        if let Some(reply) = close_if_carrier_missing(&self.container, ctx) {
            return reply;
        }
        match (event.slot, event.kind) {
            (Some(index), _) if index < SIZE => Reply::cancel(),
            (_, ClickKind::ShiftLeft | ClickKind::ShiftRight) => Reply::cancel(),
            _ => Reply::allow(),
        }
    }
}
