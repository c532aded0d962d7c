use astra_shared::{EntityKind, EntityState, Vec2};
use astra_test::Harness;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn id_reuse_on_the_authoritative_side_is_safe_for_the_observer() {
    init_logs();
    let mut harness = Harness::new();

    let first = harness.spawn(EntityKind::Mob, 50.0, 50.0);
    let first_uuid = harness.server.entity(first).unwrap().uuid();
    harness.pump();

    harness.server.discard_entity(first);
    harness.step();
    assert!(harness.client.entity(first).is_none());

    // the recycled id now names a different entity on both sides
    let second = harness.spawn(EntityKind::Marker, 70.0, 70.0);
    assert_eq!(second, first);
    harness.pump();

    let shadow = harness.client.entity(second).unwrap();
    assert_eq!(shadow.kind(), EntityKind::Marker);
    assert_ne!(shadow.uuid(), first_uuid);
    assert!(harness.client.entity_by_uuid(first_uuid).is_none());
}

#[test]
fn creation_and_removal_ordering_is_consistent_across_the_boundary() {
    let mut harness = Harness::new();

    // a burst of lifecycle churn inside single ticks must replay cleanly
    let a = harness.spawn(EntityKind::Mob, 10.0, 10.0);
    let b = harness.spawn(EntityKind::Mob, 600.0, 600.0);
    let c = harness.spawn(EntityKind::Marker, 900.0, 900.0);
    harness.server.discard_entity(b);
    harness.step();

    assert_eq!(harness.server.manager().index().len(), 2);
    assert_eq!(harness.client.index().len(), 2);
    assert!(harness.client.entity(a).is_some());
    assert!(harness.client.entity(b).is_none());
    assert!(harness.client.entity(c).is_some());
}

#[test]
fn projectile_spawns_carry_their_owner_seed() {
    let mut harness = Harness::new();
    let mob = harness.spawn(EntityKind::Mob, 100.0, 900.0);
    harness.pump();

    let owner_ref = astra_shared::EntityRef::to_entity(harness.server.entity(mob).unwrap());
    let mut round = harness.server.create_entity(EntityKind::Projectile).unwrap();
    round.position = Vec2::new(100.0, 900.0) + Vec2::new(0.0, -50.0);
    let round_id = round.id();
    {
        let EntityState::Projectile { owner, hostile, .. } = round.state_mut() else {
            panic!("expected projectile state");
        };
        *owner = Some(owner_ref);
        *hostile = true;
    }
    assert!(harness.server.spawn_entity(round));
    harness.pump();

    // the observer seeded its own back-reference and side tag from the wire
    let shadow = harness.client.entity(round_id).unwrap();
    let EntityState::Projectile { owner, hostile, .. } = shadow.state() else {
        panic!("expected projectile state");
    };
    assert!(*hostile);
    let owner = owner.as_ref().expect("owner reference seeded");
    assert_eq!(owner.uuid(), harness.client.entity(mob).unwrap().uuid());
}

#[test]
fn the_whole_population_survives_a_long_mixed_run() {
    init_logs();
    let mut harness = Harness::new();

    for wave in 0..10u32 {
        let x = 100.0 + f64::from(wave) * 40.0;
        harness.spawn(EntityKind::Mob, x, 400.0);
        if wave % 2 == 0 {
            harness.spawn(EntityKind::Projectile, x, 800.0);
        }
        harness.step();
    }
    for _ in 0..60 {
        harness.step();
    }

    // whatever survived, both sides agree on the census
    let server_ids: Vec<u32> = harness
        .server
        .manager()
        .index()
        .ids()
        .into_iter()
        .map(u32::from)
        .collect();
    let client_ids: Vec<u32> = harness
        .client
        .index()
        .ids()
        .into_iter()
        .map(u32::from)
        .collect();
    log::info!("census after the run: {} entities", server_ids.len());
    assert_eq!(server_ids, client_ids);

    for id in harness.server.manager().index().ids() {
        let authoritative = harness.server.entity(id).unwrap();
        let shadow = harness.client.entity(id).unwrap();
        assert_eq!(authoritative.uuid(), shadow.uuid());
        assert_eq!(authoritative.kind(), shadow.kind());
    }
}
