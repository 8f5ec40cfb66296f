use crate::config::exit_on_persistence_failure;
use crate::container::{Tier, slot_is_carrier};
use crate::error::{Result, SatchelError};
use crate::host::Feedback;
use crate::item::{ItemStack, Slot, is_occupied};
use crate::permissions::{self, Permission};
use crate::ui::event::ClickEvent;
use crate::ui::grid::{GridView, ViewId};
use crate::ui::icons;
use crate::ui::screen::{Reply, Screen, UiContext};
use crate::ui::session::Session;

use super::customizer::{NAME_TAG_KIND, held_name};

const SIZE: usize = 36;
const TITLE: &str = "Satchel settings";

/// Admin buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminAction {
    /// Use the name tag on the cursor as the default display name.
    SetDefaultName,
    /// Advance the default color.
    CycleColor,
    /// Advance the default tier, wrapping to the smallest.
    CycleTier,
    /// Store the inventory as the default contents of new containers.
    SetDefaultContents,
    /// Store the hotbar as the cost of expanding to this tier.
    CaptureCost(Tier),
    /// Flip whether a permission node is required.
    TogglePermission(Permission),
    /// Close the screen.
    Close,
}

fn layout() -> Vec<(usize, AdminAction)> {
    let mut slots = vec![
        (4, AdminAction::SetDefaultName),
        (10, AdminAction::CycleColor),
        (13, AdminAction::CycleTier),
        (16, AdminAction::SetDefaultContents),
    ];
    let upgrades = Tier::ALL.iter().copied().filter(|t| t.ordinal() > 1);
    slots.extend(upgrades.zip([19, 21, 23, 25]).map(|(t, s)| (s, AdminAction::CaptureCost(t))));
    slots.extend(
        Permission::ALL
            .iter()
            .copied()
            .zip(29..)
            .map(|(p, s)| (s, AdminAction::TogglePermission(p))),
    );
    slots.push((35, AdminAction::Close));
    slots
}

/// What: Hotbar stacks up to the first empty or carrier slot.
///
/// Details:
/// - Used for expansion costs: a gap or a container ends the list.
#[must_use]
pub fn hotbar_prefix(hotbar: &[Slot]) -> Vec<ItemStack> {
    hotbar
        .iter()
        .take_while(|slot| is_occupied(slot) && !slot_is_carrier(slot))
        .flatten()
        .cloned()
        .collect()
}

/// What: Inventory stacks used as default contents for new containers.
///
/// Inputs:
/// - `slots`: The actor's whole storage, hotbar first
/// - `capacity`: Slots a new container of the default tier holds
///
/// Details:
/// - Gaps and containers are skipped; at most `capacity` stacks are kept.
#[must_use]
pub fn inventory_contents(slots: &[Slot], capacity: usize) -> Vec<Slot> {
    slots
        .iter()
        .filter(|slot| is_occupied(slot) && !slot_is_carrier(slot))
        .take(capacity)
        .cloned()
        .collect()
}

/// Config writes are fatal when they fail to persist.
fn persist(result: Result<()>) -> Result<()> {
    match result {
        Err(err @ SatchelError::PersistenceFailure { .. }) => exit_on_persistence_failure(&err),
        other => other,
    }
}

/// Admin screen editing container defaults, expansion costs and permission toggles.
#[derive(Debug)]
pub struct AdminView {
    grid: GridView<AdminAction>,
}

impl AdminView {
    /// What: Build an unopened admin screen for `viewer`.
    ///
    /// # Errors
    /// - `InvalidArgument` when `viewer` is blank
    pub fn new(viewer: &str) -> Result<Self> {
        Ok(Self {
            grid: GridView::new(viewer, TITLE, SIZE)?,
        })
    }

    fn icon(action: AdminAction, ctx: &UiContext<'_>) -> ItemStack {
        let config = &*ctx.config;
        match action {
            AdminAction::SetDefaultName => icons::button(
                NAME_TAG_KIND,
                "Default name",
                &[
                    config.default_name(),
                    "Hold a named name tag on your cursor and click".to_string(),
                ],
            ),
            AdminAction::CycleColor => {
                let color = config.default_color();
                let mut icon = icons::button(
                    &color.dye_kind(),
                    "Default color",
                    &[color.friendly_name().to_string(), "Click to cycle".to_string()],
                );
                if let Some(meta) = icon.meta.as_mut() {
                    meta.texture = Some(color.texture());
                }
                icon
            }
            AdminAction::CycleTier => {
                let tier = config.default_tier();
                icons::button(
                    "chest",
                    "Default size",
                    &[
                        format!("{} ({} slots)", tier.friendly_name(), tier.slots()),
                        "Click to cycle".to_string(),
                    ],
                )
            }
            AdminAction::SetDefaultContents => {
                let contents: Vec<ItemStack> =
                    config.default_contents().into_iter().flatten().collect();
                let mut lore = icons::item_lines(&contents);
                lore.push("Click to use your inventory".to_string());
                icons::button("bundle", "Default contents", &lore)
            }
            AdminAction::CaptureCost(tier) => {
                let mut lore = icons::item_lines(&config.expansion_cost(tier));
                lore.push("Click to use your hotbar".to_string());
                icons::button(
                    "gold_ingot",
                    &format!("Cost to reach {}", tier.friendly_name()),
                    &lore,
                )
            }
            AdminAction::TogglePermission(permission) => icons::toggle(
                permission.label(),
                config.permission_required(permission),
            ),
            AdminAction::Close => icons::button("barrier", "Close", &[]),
        }
    }

    /// What: Carry out one admin action.
    ///
    /// Output:
    /// - `Ok(message)` to report success, `Err(message)` when the action was refused,
    ///   `None` for close
    fn apply(
        action: AdminAction,
        ctx: &mut UiContext<'_>,
    ) -> Result<Option<std::result::Result<String, String>>> {
        let message = match action {
            AdminAction::SetDefaultName => match held_name(ctx.actor.inventory()) {
                Ok(name) => {
                    persist(ctx.config.set_default_name(&name))?;
                    format!("Default name set to {name}.")
                }
                Err(message) => return Ok(Some(Err(message))),
            },
            AdminAction::CycleColor => {
                let color = ctx.config.default_color().next();
                persist(ctx.config.set_default_color(color))?;
                format!("Default color set to {}.", color.friendly_name())
            }
            AdminAction::CycleTier => {
                let tier = ctx.config.default_tier().cycle();
                persist(ctx.config.set_default_tier(tier))?;
                format!("Default size set to {}.", tier.friendly_name())
            }
            AdminAction::SetDefaultContents => {
                let capacity = ctx.config.default_tier().slots();
                let contents = inventory_contents(ctx.actor.inventory().slots(), capacity);
                persist(ctx.config.set_default_contents(&contents))?;
                format!("Default contents set ({} stacks).", contents.len())
            }
            AdminAction::CaptureCost(tier) => {
                let cost = hotbar_prefix(ctx.actor.inventory().hotbar());
                persist(ctx.config.set_expansion_cost(tier, &cost))?;
                format!(
                    "Cost to reach {} set to {}.",
                    tier.friendly_name(),
                    icons::item_lines(&cost).join(", ")
                )
            }
            AdminAction::TogglePermission(permission) => {
                let required = !ctx.config.permission_required(permission);
                persist(ctx.config.set_permission_required(permission, required))?;
                format!(
                    "{} {}.",
                    permission.label(),
                    if required { "now requires permission" } else { "is open to everyone" }
                )
            }
            AdminAction::Close => return Ok(None),
        };
        tracing::info!(action = ?action, "[Admin] Config updated");
        Ok(Some(Ok(message)))
    }
}

impl Screen for AdminView {
    type Action = AdminAction;

    fn grid(&self) -> &GridView<AdminAction> {
        &self.grid
    }

    fn grid_mut(&mut self) -> &mut GridView<AdminAction> {
        &mut self.grid
    }

    fn refresh(&mut self, ctx: &mut UiContext<'_>) -> Result<()> {
        for index in 0..SIZE {
            self.grid.set_slot(index, Some(icons::filler()));
        }
        for (slot, action) in layout() {
            let icon = Self::icon(action, ctx);
            self.grid.bind(slot, icon, action)?;
        }
        Ok(())
    }

    fn on_action(
        &mut self,
        action: AdminAction,
        _event: &ClickEvent,
        ctx: &mut UiContext<'_>,
    ) -> Result<Reply> {
        match Self::apply(action, ctx)? {
            None => return Ok(Reply::close()),
            Some(Ok(message)) => ctx.actor.notify(Feedback::success(message)),
            Some(Err(message)) => {
                ctx.actor.notify(Feedback::failure(message));
                return Ok(Reply::cancel());
            }
        }
        self.refresh(ctx)?;
        Ok(Reply::cancel())
    }
}

/// What: Open the admin screen for the actor in `ctx`.
///
/// Output:
/// - `None` when the actor lacks the admin permission (they were told why)
///
/// # Errors
/// - `InvalidState` when the actor is offline
pub fn open_admin_menu(session: &mut Session, ctx: &mut UiContext<'_>) -> Result<Option<ViewId>> {
    if !ctx.actor.is_online() {
        return Err(SatchelError::invalid_state(format!(
            "actor '{}' is not online",
            ctx.actor.name()
        )));
    }
    if !permissions::check(ctx.actor, ctx.config, Permission::OpenAdminMenu) {
        return Ok(None);
    }
    let view = AdminView::new(ctx.actor.name())?;
    session.open(Box::new(view), ctx).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Cost capture stops at the first gap or container.
    fn hotbar_prefix_stops_at_gap_or_carrier() {
        let leather = Some(ItemStack::new("leather", 8));
        let iron = Some(ItemStack::new("iron_ingot", 4));
        let hotbar = vec![leather.clone(), iron.clone(), None, leather.clone()];
        assert_eq!(
            hotbar_prefix(&hotbar),
            vec![ItemStack::new("leather", 8), ItemStack::new("iron_ingot", 4)]
        );
        let with_carrier = vec![leather, Some(crate::container::blank_carrier()), iron];
        assert_eq!(hotbar_prefix(&with_carrier), vec![ItemStack::new("leather", 8)]);
        assert!(hotbar_prefix(&[Some(ItemStack::new("air", 1))]).is_empty());
    }

    #[test]
    /// What: Default contents skip gaps and containers and stop at the capacity.
    fn inventory_contents_skip_gaps_and_respect_capacity() {
        let stone = Some(ItemStack::new("stone", 1));
        let slots = vec![
            stone.clone(),
            None,
            Some(crate::container::blank_carrier()),
            Some(ItemStack::new("air", 1)),
            stone.clone(),
            stone.clone(),
        ];
        assert_eq!(inventory_contents(&slots, 9).len(), 3);
        assert_eq!(inventory_contents(&slots, 2), vec![stone.clone(), stone]);
    }

    #[test]
    fn layout_binds_every_setting_once() {
        let slots = layout();
        assert_eq!(slots.len(), 4 + 4 + 5 + 1);
        let mut indices: Vec<usize> = slots.iter().map(|(s, _)| *s).collect();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), slots.len());
        assert!(indices.iter().all(|&i| i < SIZE));
    }
}
