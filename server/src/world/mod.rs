//! The authoritative world: tick orchestration, entity lifecycle, collision
//! routing, and replication to observers.

mod entity_manager;
mod tracker_entry;

pub use entity_manager::EntityManager;
pub use tracker_entry::TrackerEntry;

use std::collections::BTreeMap;

use log::warn;

use astra_shared::{
    Entity, EntityKind, EntityRef, EntityRemovePacket, EntitySpawnPacket, EntityState, EntityUuid,
    KeyGenerator, NetId, Packet, PacketSink, TimerContext, TimerHandle, TimerQueue, Vec2,
    WorldConfig,
};

/// The authoritative simulation context.
///
/// One `tick()` call advances simulated time by exactly the configured fixed
/// delta; real-time accumulation and pacing belong to the caller. The world
/// is passed by reference into entity behavior and timer callbacks — there is
/// no ambient singleton.
pub struct ServerWorld<S: PacketSink> {
    config: WorldConfig,
    time: f64,
    tick_count: u64,
    timers: TimerQueue<Self>,
    manager: EntityManager,
    tracker_entries: BTreeMap<NetId, TrackerEntry>,
    entity_ids: KeyGenerator<NetId>,
    sink: S,
}

impl<S: PacketSink> ServerWorld<S> {
    pub fn new(config: WorldConfig, sink: S) -> Self {
        let entity_ids = KeyGenerator::new(config.entity_id_ceiling);
        Self {
            config,
            time: 0.0,
            tick_count: 0,
            timers: TimerQueue::new(),
            manager: EntityManager::new(),
            tracker_entries: BTreeMap::new(),
            entity_ids,
            sink,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn manager(&self) -> &EntityManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut EntityManager {
        &mut self.manager
    }

    pub fn entity(&self, id: NetId) -> Option<&Entity> {
        self.manager.index().get(id)
    }

    pub fn entity_mut(&mut self, id: NetId) -> Option<&mut Entity> {
        self.manager.index_mut().get_mut(id)
    }

    pub fn entity_by_uuid(&self, uuid: EntityUuid) -> Option<&Entity> {
        self.manager.index().get_by_uuid(uuid)
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // entity factory & lifecycle

    /// Mints a record with a fresh net id and uuid; `None` when the net-id
    /// space is exhausted. The record is Pending until `spawn_entity` accepts
    /// it.
    pub fn create_entity(&mut self, kind: EntityKind) -> Option<Entity> {
        let id = self.entity_ids.allocate()?;
        Some(Entity::new(id, mint_uuid(), kind))
    }

    /// Makes a pending record live. Rejects records already marked removed
    /// and identity collisions; in both cases the duplicate is discarded, its
    /// net id returned to the allocator, and `false` comes back.
    pub fn spawn_entity(&mut self, entity: Entity) -> bool {
        if entity.is_removed() {
            warn!(
                "tried to add {} {} but it was marked as removed already",
                entity.kind().name(),
                entity.id()
            );
            self.entity_ids.deallocate(entity.id());
            return false;
        }

        match self.manager.add_entity(entity) {
            Ok(id) => {
                self.start_tracking(id);
                true
            }
            Err(rejected) => {
                self.entity_ids.deallocate(rejected.id());
                false
            }
        }
    }

    /// Marks an entity for removal; it stays live until this tick's sweep
    pub fn discard_entity(&mut self, id: NetId) {
        let Some(entity) = self.manager.index_mut().get_mut(id) else {
            return;
        };
        entity.discard();
        self.manager.mark_for_removal(id);
    }

    // scheduling

    pub fn schedule(
        &mut self,
        delay: f64,
        callback: impl FnMut(&mut Self) + 'static,
    ) -> TimerHandle {
        let now = self.time;
        self.timers.schedule(now, delay, Box::new(callback))
    }

    pub fn schedule_interval(
        &mut self,
        interval: f64,
        callback: impl FnMut(&mut Self) + 'static,
    ) -> TimerHandle {
        let now = self.time;
        self.timers.schedule_interval(now, interval, Box::new(callback))
    }

    // the tick loop

    /// Advances the world by one fixed step: drain due timers, tick every
    /// live entity once in index-stable order (resolving its proximity
    /// interactions as part of its turn), replicate, then process removals —
    /// exactly once, never interleaved with entity ticking.
    pub fn tick(&mut self) {
        self.time += self.config.tick_delta;
        self.tick_count += 1;
        self.process_timers();

        for id in self.manager.index().ids() {
            let Some(mut entity) = self.manager.index_mut().take(id) else {
                continue;
            };
            if entity.is_removed() {
                // discarded outside its own turn; keep it queued for the sweep
                self.manager.index_mut().put_back(entity);
                self.manager.mark_for_removal(id);
                continue;
            }

            entity.age += 1;
            self.tick_entity(&mut entity);
            self.resolve_interactions(&mut entity);

            let discarded = entity.is_removed();
            self.manager.index_mut().put_back(entity);
            if discarded {
                self.manager.mark_for_removal(id);
            }
        }

        self.sync_entities();
        self.process_removals();
    }

    fn tick_entity(&mut self, entity: &mut Entity) {
        match entity.kind() {
            EntityKind::Projectile => self.tick_projectile(entity),
            EntityKind::Marker => tick_marker(entity),
            _ => {}
        }
        entity.integrate(self.config.tick_delta);
        self.apply_bounds(entity);
    }

    fn tick_projectile(&mut self, entity: &mut Entity) {
        let position = entity.position;
        let speed = entity.velocity.length();
        let mut expired = false;
        let mut steer: Option<Vec2> = None;

        {
            let EntityState::Projectile {
                lock_target, life, ..
            } = entity.state_mut()
            else {
                return;
            };

            if *life > 0 {
                *life -= 1;
                expired = *life == 0;
            }

            if !expired {
                if let Some(target_ref) = lock_target {
                    match target_ref.resolve(self.manager.index()) {
                        Some(target) => {
                            steer = Some((target.position - position).normalize() * speed);
                        }
                        None => {
                            // lock lost; reacquire against live decoys. Which
                            // decoy wins is content policy, not a core
                            // contract — lowest net id is taken here.
                            *lock_target = find_decoy(&self.manager);
                        }
                    }
                }
            }
        }

        if expired {
            entity.discard();
            return;
        }
        if let Some(velocity) = steer {
            entity.velocity = velocity;
        }
    }

    /// Living entities are clamped to the playfield; projectiles flying past
    /// its margin are spent
    fn apply_bounds(&self, entity: &mut Entity) {
        let width = self.config.world_width;
        let height = self.config.world_height;
        match entity.kind() {
            EntityKind::Player | EntityKind::Mob => {
                entity.position.x = entity.position.x.clamp(0.0, width);
                entity.position.y = entity.position.y.clamp(0.0, height);
            }
            EntityKind::Projectile => {
                let margin = 64.0;
                if entity.position.x < -margin
                    || entity.position.x > width + margin
                    || entity.position.y < -margin
                    || entity.position.y > height + margin
                {
                    entity.discard();
                }
            }
            EntityKind::Marker => {}
        }
    }

    /// Proximity interaction routing for the entity whose turn it is.
    ///
    /// The entity is in hand (lifted out of the index), so a handler may
    /// discard it or any other entity freely; eviction is deferred to the
    /// end-of-tick sweep, which makes such discards safe no-ops for the rest
    /// of this tick.
    fn resolve_interactions(&mut self, entity: &mut Entity) {
        if entity.is_removed() {
            return;
        }
        match entity.kind() {
            EntityKind::Mob => self.mob_contact(entity),
            EntityKind::Projectile => self.projectile_hits(entity),
            EntityKind::Player | EntityKind::Marker => {}
        }
    }

    /// Mob body against player hulls
    fn mob_contact(&mut self, mob: &mut Entity) {
        let contact_damage = match mob.state() {
            EntityState::Mob { contact_damage } => *contact_damage,
            _ => return,
        };

        let player_ids: Vec<NetId> = self.manager.players().iter().copied().collect();
        for id in player_ids {
            let Some(player) = self.manager.index_mut().get_mut(id) else {
                continue;
            };
            if player.is_removed() || player.is_invulnerable() || !mob.collides_with(player) {
                continue;
            }
            let died = player.damage(contact_damage);
            if died {
                self.manager.mark_for_removal(id);
            }
            return;
        }
    }

    fn projectile_hits(&mut self, projectile: &mut Entity) {
        let (hostile, intercepts, damage) = match projectile.state() {
            EntityState::Projectile {
                hostile,
                intercepts,
                damage,
                ..
            } => (*hostile, *intercepts, *damage),
            _ => return,
        };

        if hostile {
            // enemy round against player hulls
            let player_ids: Vec<NetId> = self.manager.players().iter().copied().collect();
            for id in player_ids {
                let Some(player) = self.manager.index_mut().get_mut(id) else {
                    continue;
                };
                if player.is_removed() || player.is_invulnerable() || !projectile.collides_with(player)
                {
                    continue;
                }
                let died = player.damage(damage);
                if died {
                    self.manager.mark_for_removal(id);
                }
                projectile.discard();
                return;
            }
            return;
        }

        // interceptor rounds clear opposing projectiles first
        if intercepts {
            let projectile_ids: Vec<NetId> = self.manager.projectiles().iter().copied().collect();
            for id in projectile_ids {
                if id == projectile.id() {
                    continue;
                }
                let Some(other) = self.manager.index_mut().get_mut(id) else {
                    continue;
                };
                let opposing = matches!(
                    other.state(),
                    EntityState::Projectile { hostile: true, .. }
                );
                if other.is_removed() || !opposing || !projectile.collides_with(other) {
                    continue;
                }
                other.discard();
                self.manager.mark_for_removal(id);
                projectile.discard();
                return;
            }
        }

        // player round against mobs
        let mob_ids: Vec<NetId> = self.manager.mobs().iter().copied().collect();
        for id in mob_ids {
            let Some(mob) = self.manager.index_mut().get_mut(id) else {
                continue;
            };
            if mob.is_removed() || !projectile.collides_with(mob) {
                continue;
            }
            let died = mob.damage(damage);
            if died {
                self.manager.mark_for_removal(id);
            }
            projectile.discard();
            return;
        }
    }

    // replication

    /// Drains each tracked entity's change-set into the sink — once per
    /// entity per tick, since draining clears the dirty bits
    fn sync_entities(&mut self) {
        let ids: Vec<NetId> = self.tracker_entries.keys().copied().collect();
        for id in ids {
            let Some(entity) = self.manager.index_mut().get_mut(id) else {
                continue;
            };
            let Some(entry) = self.tracker_entries.get_mut(&id) else {
                continue;
            };
            entry.tick(entity, &mut self.sink, &self.config);
        }
    }

    /// Start-tracking hook: opens a tracker entry and announces the spawn
    fn start_tracking(&mut self, id: NetId) {
        let Some(entity) = self.manager.index().get(id) else {
            return;
        };
        let owner = match entity.state() {
            EntityState::Projectile {
                owner: Some(owner), ..
            } => owner.cached_id().unwrap_or(NetId::NONE),
            _ => NetId::NONE,
        };
        self.tracker_entries.insert(id, TrackerEntry::new(entity));
        let packet = Packet::Spawn(EntitySpawnPacket::create(entity, owner));
        self.sink.send_packet(&packet);
    }

    /// Stop-tracking hook: closes the tracker entry, announces the removal,
    /// and recycles the net id
    fn stop_tracking(&mut self, entity: &Entity) {
        self.tracker_entries.remove(&entity.id());
        self.sink.send_packet(&Packet::Remove(EntityRemovePacket {
            id: entity.id(),
            uuid: entity.uuid(),
        }));
        self.entity_ids.deallocate(entity.id());
    }

    fn process_removals(&mut self) {
        for entity in self.manager.process_removals() {
            self.stop_tracking(&entity);
        }
    }
}

impl<S: PacketSink> TimerContext for ServerWorld<S> {
    fn timer_queue(&mut self) -> &mut TimerQueue<Self> {
        &mut self.timers
    }

    fn sim_time(&self) -> f64 {
        self.time
    }
}

fn tick_marker(entity: &mut Entity) {
    let expired = {
        let EntityState::Marker { ttl } = entity.state_mut() else {
            return;
        };
        if *ttl > 0 {
            *ttl -= 1;
            *ttl == 0
        } else {
            false
        }
    };
    if expired {
        entity.discard();
    }
}

/// Lowest-net-id live decoy marker, if any
fn find_decoy(manager: &EntityManager) -> Option<EntityRef> {
    for id in manager.markers() {
        if let Some(marker) = manager.index().get(*id) {
            if marker.is_decoy() && !marker.is_removed() {
                return Some(EntityRef::to_entity(marker));
            }
        }
    }
    None
}

/// Mints a non-zero 128-bit identity
fn mint_uuid() -> EntityUuid {
    loop {
        let raw = (u128::from(fastrand::u64(..)) << 64) | u128::from(fastrand::u64(..));
        if raw != 0 {
            return EntityUuid::from_raw(raw);
        }
    }
}
