//! Integration tests for the admin settings screen.

mod common;

use common::{Harness, HostCall};
use satchel::config::ConfigStore;
use satchel::container::{Color, Tier, blank_carrier};
use satchel::host::{Actor, Cue};
use satchel::item::{ItemMeta, ItemStack};
use satchel::permissions::Permission;
use satchel::ui::screens::open_admin_menu;
use satchel::ui::ViewId;

const DEFAULT_NAME: usize = 4;
const CYCLE_COLOR: usize = 10;
const CYCLE_TIER: usize = 13;
const DEFAULT_CONTENTS: usize = 16;
const COST_MEDIUM: usize = 19;
const TOGGLE_FIRST: usize = 29;
const CLOSE: usize = 35;

fn open_admin(h: &mut Harness) -> ViewId {
    let view = h
        .with_ctx(open_admin_menu)
        .expect("open")
        .expect("permitted");
    h.tick();
    view
}

fn reopen(h: &Harness) -> ConfigStore {
    ConfigStore::open(h.dir.path().join("config.yml")).expect("reopen")
}

#[test]
fn admin_menu_requires_permission() {
    let mut h = Harness::new();
    h.actor.revoke(Permission::OpenAdminMenu.node());
    let denied = h.with_ctx(open_admin_menu).expect("no error");
    assert_eq!(denied, None);
    assert_eq!(h.actor.last_feedback().map(|f| f.cue), Some(Cue::Failure));
    assert!(h.session.is_empty());
}

#[test]
/// What: Cycling defaults writes through to the document immediately.
///
/// Inputs:
/// - Stock config (brown, small); one click on each cycle button.
///
/// Output:
/// - Green and medium, visible to a freshly opened store.
fn cycling_defaults_persists_immediately() {
    let mut h = Harness::new();
    let view = open_admin(&mut h);
    assert_eq!(h.renderer.last_frame.as_ref().map(|f| f.slots.len()), Some(36));

    h.click(view, CYCLE_COLOR);
    h.click(view, CYCLE_TIER);
    assert_eq!(h.config.default_color(), Color::Green);
    assert_eq!(h.config.default_tier(), Tier::Medium);
    let disk = reopen(&h);
    assert_eq!(disk.default_color(), Color::Green);
    assert_eq!(disk.default_tier(), Tier::Medium);
    assert_eq!(h.actor.last_feedback().map(|f| f.cue), Some(Cue::Success));
}

#[test]
fn tier_cycle_wraps_to_smallest() {
    let mut h = Harness::new();
    h.config.set_default_tier(Tier::Giant).expect("persist");
    let view = open_admin(&mut h);
    h.click(view, CYCLE_TIER);
    assert_eq!(h.config.default_tier(), Tier::Small);
}

#[test]
/// What: Cost capture takes the hotbar up to the first gap or container.
fn capture_cost_truncates_at_gap_or_carrier() {
    let mut h = Harness::new();
    let inv = h.actor.inventory_mut();
    inv.set(0, Some(ItemStack::new("leather", 4)));
    inv.set(1, Some(ItemStack::new("string", 2)));
    inv.set(2, Some(blank_carrier()));
    inv.set(3, Some(ItemStack::new("diamond", 64)));
    let view = open_admin(&mut h);

    h.click(view, COST_MEDIUM);
    let expected = vec![ItemStack::new("leather", 4), ItemStack::new("string", 2)];
    assert_eq!(h.config.expansion_cost(Tier::Medium), expected);
    assert_eq!(reopen(&h).expansion_cost(Tier::Medium), expected);
}

#[test]
/// What: Default contents come from the whole inventory, skipping containers.
///
/// Inputs:
/// - Stacks in hotbar slots 0 and 3 and storage slot 12, a carrier in slot 20.
///
/// Output:
/// - All three stacks stored in order; a new container starts with them.
fn default_contents_come_from_the_inventory() {
    let mut h = Harness::new();
    let inv = h.actor.inventory_mut();
    inv.set(0, Some(ItemStack::new("torch", 8)));
    inv.set(3, Some(ItemStack::new("bread", 4)));
    inv.set(12, Some(ItemStack::new("emerald", 1)));
    let view = open_admin(&mut h);

    h.click(view, DEFAULT_CONTENTS);
    let contents: Vec<ItemStack> = h.config.default_contents().into_iter().flatten().collect();
    assert_eq!(
        contents,
        vec![
            ItemStack::new("torch", 8),
            ItemStack::new("bread", 4),
            ItemStack::new("emerald", 1)
        ]
    );

    h.actor.inventory_mut().set(20, Some(blank_carrier()));
    let fresh = h.load(20);
    assert_eq!(fresh.occupied(), 3);
}

#[test]
fn default_contents_stop_at_default_capacity() {
    let mut h = Harness::new();
    for slot in 0..12 {
        h.actor
            .inventory_mut()
            .set(slot, Some(ItemStack::new("cobblestone", 64)));
    }
    let view = open_admin(&mut h);
    h.click(view, DEFAULT_CONTENTS);
    assert_eq!(
        reopen(&h).default_contents().iter().flatten().count(),
        Tier::Small.slots()
    );
}

#[test]
/// What: The default name comes from a named name tag and respects the width limit.
fn default_name_is_taken_from_a_held_name_tag() {
    let mut h = Harness::new();
    let view = open_admin(&mut h);
    let tag = |name: &str| {
        ItemStack::new("name_tag", 1).with_meta(ItemMeta {
            display_name: Some(name.to_string()),
            ..ItemMeta::default()
        })
    };

    h.click(view, DEFAULT_NAME);
    assert_eq!(h.actor.last_feedback().map(|f| f.cue), Some(Cue::Failure));
    assert_eq!(h.config.default_name(), "Backpack");

    h.actor
        .inventory_mut()
        .set_cursor(Some(tag("An unreasonably long default backpack name")));
    h.click(view, DEFAULT_NAME);
    assert_eq!(h.actor.last_feedback().map(|f| f.cue), Some(Cue::Failure));
    assert_eq!(h.config.default_name(), "Backpack");

    h.actor.inventory_mut().set_cursor(Some(tag("Rucksack")));
    h.click(view, DEFAULT_NAME);
    assert_eq!(h.actor.last_feedback().map(|f| f.cue), Some(Cue::Success));
    assert_eq!(reopen(&h).default_name(), "Rucksack");
    assert!(h.actor.inventory().cursor().is_some());

    h.give_carrier(5);
    assert_eq!(h.load(5).display_name(), "Rucksack");
}

#[test]
/// What: Each permission toggle flips its own requirement and nothing else.
fn permission_toggles_flip_requirements() {
    let mut h = Harness::new();
    let view = open_admin(&mut h);
    for (offset, permission) in Permission::ALL.into_iter().enumerate() {
        assert!(h.config.permission_required(permission));
        h.click(view, TOGGLE_FIRST + offset);
        assert!(!h.config.permission_required(permission));
    }
    assert!(!reopen(&h).permission_required(Permission::Rename));

    h.click(view, TOGGLE_FIRST + 3);
    assert!(h.config.permission_required(Permission::Rename));
    assert!(!h.config.permission_required(Permission::Expand));
}

#[test]
fn close_button_closes_on_next_tick() {
    let mut h = Harness::new();
    let view = open_admin(&mut h);
    h.click(view, CLOSE);
    assert!(!h.session.is_empty());
    h.tick();
    assert_eq!(h.renderer.calls.last(), Some(&HostCall::Close(view)));
    assert!(h.session.is_empty());
}
