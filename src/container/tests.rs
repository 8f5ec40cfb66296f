use super::{Color, Container, Tier, blank_carrier, fields, read_representation};
use crate::codec;
use crate::config::ConfigStore;
use crate::error::SatchelError;
use crate::host::{Actor, SimpleActor};
use crate::item::{ItemMeta, ItemStack, Slot};
use crate::util::ManualClock;

struct Fixture {
    _dir: tempfile::TempDir,
    config: ConfigStore,
    clock: ManualClock,
    actor: SimpleActor,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ConfigStore::open(dir.path().join("config.yml")).expect("config");
    let mut actor = SimpleActor::new("alex");
    actor.inventory_mut().set(3, Some(blank_carrier()));
    Fixture {
        _dir: dir,
        config,
        clock: ManualClock::new(1_700_000_000_000),
        actor,
    }
}

fn stones(n: usize) -> Vec<Slot> {
    (0..n)
        .map(|i| Some(ItemStack::new("cobblestone", u32::try_from(i + 1).unwrap_or(1))))
        .collect()
}

fn open(fx: &Fixture) -> Container {
    let carrier = fx.actor.inventory().get(3).cloned().expect("carrier");
    Container::from_carrier(&fx.actor, &carrier, &fx.config, &fx.clock).expect("container")
}

fn carrier_with(raw: &[(&str, String)]) -> ItemStack {
    let map: std::collections::BTreeMap<String, String> = raw
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect();
    let mut meta = ItemMeta::default();
    meta.tags.insert(
        super::CONTAINER_TAG.to_string(),
        serde_json::to_string(&map).expect("json"),
    );
    ItemStack::new(super::CARRIER_KIND, 1).with_meta(meta)
}

#[test]
/// What: A blank carrier materializes with configured defaults.
///
/// Inputs:
/// - Blank carrier, stock config, manual clock.
///
/// Output:
/// - Tier 1 (9 slots), brown, "Backpack", no items, never opened, created now.
fn fresh_container_uses_defaults() {
    let fx = fixture();
    let c = open(&fx);
    assert_eq!(c.tier(), Tier::Small);
    assert_eq!(c.capacity(), 9);
    assert_eq!(c.color(), Color::Brown);
    assert_eq!(c.display_name(), "Backpack");
    assert!(c.items().is_empty());
    assert_eq!(c.last_opened_at(), -1);
    assert_eq!(c.created_at(), 1_700_000_000_000);
    assert!(c.overflow().is_none());
    assert!(!c.id().is_empty());
    assert_eq!(c.owner(), "alex");
    for key in [
        fields::NAME,
        fields::COLOR,
        fields::TIER,
        fields::CONTENTS,
        fields::CREATED,
        fields::LAST_OPENED,
    ] {
        assert!(c.representation().contains_key(key), "missing {key}");
    }
}

#[test]
fn construction_rejects_missing_inputs() {
    let fx = fixture();
    let plain = ItemStack::new("player_head", 1);
    assert!(matches!(
        Container::from_carrier(&fx.actor, &plain, &fx.config, &fx.clock),
        Err(SatchelError::InvalidArgument(_))
    ));
    let nameless = SimpleActor::new("  ");
    assert!(matches!(
        Container::from_carrier(&nameless, &blank_carrier(), &fx.config, &fx.clock),
        Err(SatchelError::InvalidArgument(_))
    ));
}

#[test]
/// What: Explicit writes are checked against capacity before anything changes.
fn set_items_enforces_capacity_up_front() {
    let fx = fixture();
    let mut c = open(&fx);
    for k in 0..=9 {
        c.set_items(stones(k)).expect("fits");
        assert_eq!(c.occupied(), k);
    }
    let before = c.clone();
    let err = c.set_items(stones(10)).expect_err("too many");
    assert!(matches!(
        err,
        SatchelError::CapacityExceeded {
            occupied: 10,
            capacity: 9
        }
    ));
    assert_eq!(c, before);
}

#[test]
fn set_items_compacts_trailing_gaps() {
    let fx = fixture();
    let mut c = open(&fx);
    let mut items: Vec<Slot> = vec![None; 20];
    items[0] = Some(ItemStack::new("torch", 4));
    items[17] = Some(ItemStack::new("bread", 2));
    c.set_items(items).expect("two items fit");
    assert_eq!(c.items().len(), 9);
    assert_eq!(c.occupied(), 2);
    assert_eq!(c.items()[0], Some(ItemStack::new("torch", 4)));
    assert!(c.items().contains(&Some(ItemStack::new("bread", 2))));
}

#[test]
fn reconcile_is_idempotent() {
    let fx = fixture();
    let mut c = open(&fx);
    c.set_items(stones(5)).expect("fits");
    c.reconcile();
    let once = c.clone();
    c.reconcile();
    assert_eq!(c, once);
}

#[test]
/// What: Lowering the tier below the occupied count truncates and snapshots; raising does not.
fn lowering_tier_truncates_into_overflow() {
    let fx = fixture();
    let mut c = open(&fx);
    c.set_capacity_tier(Tier::Large);
    c.set_items(stones(20)).expect("fits in 27");
    let uncut = c.items().to_vec();

    c.set_capacity_tier(Tier::Small);
    assert_eq!(c.items().len(), 9);
    assert_eq!(c.items(), &uncut[..9]);
    assert_eq!(c.overflow(), Some(uncut.as_slice()));

    c.set_capacity_tier(Tier::Giant);
    assert_eq!(c.items().len(), 9);
    assert_eq!(c.overflow(), Some(uncut.as_slice()));
}

#[test]
fn lowering_tier_compacts_when_items_still_fit() {
    let fx = fixture();
    let mut c = open(&fx);
    c.set_capacity_tier(Tier::Medium);
    let mut items: Vec<Slot> = vec![None; 18];
    items[15] = Some(ItemStack::new("apple", 1));
    items[17] = Some(ItemStack::new("carrot", 1));
    c.set_items(items).expect("fits");
    c.set_capacity_tier(Tier::Small);
    assert_eq!(c.occupied(), 2);
    assert!(c.items().len() <= 9);
    assert!(c.overflow().is_none());
}

#[test]
/// What: Data edited outside the engine is cut back at load and kept for recovery.
///
/// Inputs:
/// - Carrier claiming tier 1 while holding 12 occupied stacks.
///
/// Output:
/// - 9 items after load, overflow holds all 12, and a tier increase leaves overflow intact.
fn externally_edited_carrier_keeps_overflow_through_expansion() {
    let fx = fixture();
    let twelve = stones(12);
    let carrier = carrier_with(&[
        (fields::ID, "abc-123".to_string()),
        (fields::TIER, "small".to_string()),
        (fields::CONTENTS, codec::encode(&twelve)),
    ]);
    let mut c = Container::from_carrier(&fx.actor, &carrier, &fx.config, &fx.clock).expect("load");
    assert_eq!(c.id(), "abc-123");
    assert_eq!(c.items(), &twelve[..9]);
    assert_eq!(c.overflow(), Some(twelve.as_slice()));

    c.set_capacity_tier(Tier::Medium);
    assert_eq!(c.capacity(), 18);
    assert_eq!(c.items().len(), 9);
    assert_eq!(c.overflow(), Some(twelve.as_slice()));
}

#[test]
fn expand_walks_tiers_and_stops_at_top() {
    let fx = fixture();
    let mut c = open(&fx);
    for expected in [Tier::Medium, Tier::Large, Tier::Huge, Tier::Giant] {
        assert!(c.can_expand());
        assert!(c.expand());
        assert_eq!(c.tier(), expected);
    }
    let top = c.clone();
    assert!(!c.can_expand());
    assert!(!c.expand());
    assert_eq!(c, top);
}

#[test]
/// What: Save rewrites the carrier in place and a reload sees the same state.
fn save_round_trips_through_the_carrier() {
    let mut fx = fixture();
    let mut c = open(&fx);
    c.set_display_name("Ore Bag").expect("rename");
    c.set_color(Color::Red);
    c.set_items(stones(3)).expect("fits");
    assert_eq!(c.locate_slot(&fx.actor).expect("online"), None);

    // The blank carrier has no id yet, so save cannot find it.
    assert!(!c.save(&mut fx.actor).expect("online"));

    let stamped = c.present_on(blank_carrier());
    fx.actor.inventory_mut().set(3, Some(stamped));
    assert_eq!(c.locate_slot(&fx.actor).expect("online"), Some(3));

    c.set_items(stones(4)).expect("fits");
    assert!(c.save(&mut fx.actor).expect("online"));
    let saved = fx.actor.inventory().get(3).cloned().expect("carrier");
    let meta = saved.meta.as_ref().expect("meta");
    assert_eq!(meta.display_name.as_deref(), Some("Ore Bag"));
    assert_eq!(meta.texture.as_deref(), Some("satchel:backpack/red"));
    assert!(meta.lore.iter().any(|l| l == "Contents: 4/9"));
    assert_eq!(read_representation(&saved).get(fields::ID).map(String::as_str), Some(c.id()));

    let reloaded = Container::from_carrier(&fx.actor, &saved, &fx.config, &fx.clock).expect("reload");
    assert_eq!(reloaded.id(), c.id());
    assert_eq!(reloaded.display_name(), "Ore Bag");
    assert_eq!(reloaded.color(), Color::Red);
    assert_eq!(reloaded.items(), c.items());
}

#[test]
fn offline_actor_is_invalid_state() {
    let mut fx = fixture();
    let c = open(&fx);
    fx.actor.set_online(false);
    assert!(matches!(
        c.locate_slot(&fx.actor),
        Err(SatchelError::InvalidState(_))
    ));
    assert!(matches!(
        c.save(&mut fx.actor),
        Err(SatchelError::InvalidState(_))
    ));
}

#[test]
fn blank_name_is_rejected() {
    let fx = fixture();
    let mut c = open(&fx);
    assert!(matches!(
        c.set_display_name("   "),
        Err(SatchelError::InvalidArgument(_))
    ));
    assert_eq!(c.display_name(), "Backpack");
}

#[test]
fn touch_last_opened_records_time() {
    let fx = fixture();
    let mut c = open(&fx);
    c.touch_last_opened(1_700_000_000_500);
    assert_eq!(c.last_opened_at(), 1_700_000_000_500);
    assert_eq!(c.created_at(), 1_700_000_000_000);
}
