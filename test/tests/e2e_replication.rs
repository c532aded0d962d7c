use std::cell::RefCell;
use std::rc::Rc;

use astra_shared::{data, EntityKind, Vec2};
use astra_test::Harness;

#[test]
fn the_shadow_mirrors_spawn_update_and_remove() {
    let mut harness = Harness::new();
    let mob = harness.spawn(EntityKind::Mob, 120.0, 340.0);
    harness.pump();

    // spawned on the shadow with matching identity
    let uuid = harness.server.entity(mob).unwrap().uuid();
    let shadow = harness.client.entity(mob).unwrap();
    assert_eq!(shadow.uuid(), uuid);
    assert_eq!(shadow.position, Vec2::new(120.0, 340.0));

    // an authoritative mutation flows through one synchronized step
    harness
        .server
        .entity_mut(mob)
        .unwrap()
        .tracker_mut()
        .set(data::HEALTH, 4.5);
    harness.step();
    assert_eq!(
        harness.client.entity(mob).unwrap().tracker().get(data::HEALTH),
        4.5
    );

    // removal mirrors, and both shadow lookups miss afterwards
    harness.server.discard_entity(mob);
    harness.step();
    assert!(harness.client.entity(mob).is_none());
    assert!(harness.client.entity_by_uuid(uuid).is_none());
}

#[test]
fn observer_hooks_fire_for_remote_changes_exactly_as_for_local_ones() {
    let mut harness = Harness::new();
    let player = harness.spawn(EntityKind::Player, 10.0, 10.0);
    harness.pump();

    let fired: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&fired);
    harness
        .client
        .entity_mut(player)
        .unwrap()
        .tracker_mut()
        .set_on_changed(Box::new(move |slot| seen.borrow_mut().push(slot)));

    let tracker = harness.server.entity_mut(player).unwrap().tracker_mut();
    tracker.set(data::HEALTH, 80.0);
    tracker.set(data::SCORE, 250);
    harness.step();

    assert_eq!(*fired.borrow(), vec![data::HEALTH.slot(), data::SCORE.slot()]);
    let shadow = harness.client.entity(player).unwrap();
    assert_eq!(shadow.tracker().get(data::HEALTH), 80.0);
    assert_eq!(shadow.tracker().get(data::SCORE), 250);
}

#[test]
fn an_unchanged_tick_sends_no_update_for_the_entity() {
    let mut harness = Harness::new();
    let mob = harness.spawn(EntityKind::Mob, 100.0, 100.0);
    harness.step();

    // the fast path: no dirty slots, no motion, no packets at all
    harness.server.tick();
    assert!(harness.server.sink_mut().drain().is_empty());
    let _ = mob;
}

#[test]
fn combat_results_replicate_through_the_tracked_slots() {
    let mut harness = Harness::new();
    let player = harness.spawn(EntityKind::Player, 200.0, 200.0);
    let mob = harness.spawn(EntityKind::Mob, 200.0, 200.0);
    harness.pump();

    // the mob's contact damage lands authoritatively and replicates
    harness.step();
    let shadow_health = harness
        .client
        .entity(player)
        .unwrap()
        .tracker()
        .get(data::HEALTH);
    assert_eq!(shadow_health, 90.0);
    let _ = mob;
}

#[test]
fn a_moving_entity_keeps_the_shadow_within_quantization_error() {
    let mut harness = Harness::new();
    let mob = harness.spawn(EntityKind::Mob, 100.0, 100.0);
    harness.pump();
    harness.server.entity_mut(mob).unwrap().velocity = Vec2::new(37.5, -12.25);

    for _ in 0..120 {
        harness.step();
    }

    let authoritative = harness.server.entity(mob).unwrap().position;
    let shadow = harness.client.entity(mob).unwrap().position;
    // the shadow extrapolates from quantized velocity between forced resyncs,
    // so it tracks within one step plus the fixed-point error
    assert!((authoritative.x - shadow.x).abs() < 2.0);
    assert!((authoritative.y - shadow.y).abs() < 2.0);
}

#[test]
fn a_dead_entitys_last_delta_arrives_before_its_removal() {
    let mut harness = Harness::new();
    let mob = harness.spawn(EntityKind::Mob, 100.0, 100.0);
    harness.pump();

    let fired: Rc<RefCell<Vec<f32>>> = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&fired);
    harness
        .client
        .entity_mut(mob)
        .unwrap()
        .tracker_mut()
        .set_on_changed(Box::new(move |_| seen.borrow_mut().push(0.0)));

    harness
        .server
        .entity_mut(mob)
        .unwrap()
        .tracker_mut()
        .set(data::HEALTH, 0.5);
    harness.server.discard_entity(mob);
    harness.step();

    // the hook saw the final delta even though the entity is now gone
    assert_eq!(fired.borrow().len(), 1);
    assert!(harness.client.entity(mob).is_none());
}
