use log::warn;

use astra_shared::{
    ByteReader, Entity, EntityIndex, EntityKind, EntityPositionPacket, EntityRef,
    EntityRemovePacket, EntitySpawnPacket, EntityState, EntityUpdatePacket, EntityUuid, NetId,
    Packet, Serde, TimerContext, TimerHandle, TimerQueue, WorldConfig,
};

use crate::error::ClientError;

/// The observer's shadow world.
///
/// Entities here exist only as reflections of authoritative state: spawns,
/// change-sets and removals arrive over the wire and are applied locally.
/// Between authoritative position syncs the shadow extrapolates from the last
/// known velocity. Applied change-sets fire the same attribute-changed hook a
/// local mutation would, so presentation code reacts identically either way.
pub struct ClientWorld {
    config: WorldConfig,
    time: f64,
    tick_count: u64,
    timers: TimerQueue<Self>,
    index: EntityIndex,
}

impl ClientWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            time: 0.0,
            tick_count: 0,
            timers: TimerQueue::new(),
            index: EntityIndex::new(),
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

    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    pub fn entity(&self, id: NetId) -> Option<&Entity> {
        self.index.get(id)
    }

    pub fn entity_mut(&mut self, id: NetId) -> Option<&mut Entity> {
        self.index.get_mut(id)
    }

    pub fn entity_by_uuid(&self, uuid: EntityUuid) -> Option<&Entity> {
        self.index.get_by_uuid(uuid)
    }

    /// Drops every shadow entity and pending timer, e.g. on disconnect
    pub fn clear(&mut self) {
        self.index.clear();
        self.timers.clear();
    }

    // scheduling; observer-side effects use the same queue semantics as the
    // authoritative world

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

    // receive path

    /// Decodes and applies one wire message. Decode failures are fatal to
    /// this message and propagate; the shadow world is left as it was before
    /// the failing entry.
    pub fn receive(&mut self, bytes: &[u8]) -> Result<(), ClientError> {
        let mut reader = ByteReader::new(bytes);
        let packet = Packet::de(&mut reader)?;
        self.apply(packet)
    }

    pub fn apply(&mut self, packet: Packet) -> Result<(), ClientError> {
        match packet {
            Packet::Spawn(spawn) => {
                self.apply_spawn(spawn);
                Ok(())
            }
            Packet::Update(update) => self.apply_update(update),
            Packet::Remove(remove) => {
                self.apply_remove(remove);
                Ok(())
            }
            Packet::Position(position) => {
                self.apply_position(position);
                Ok(())
            }
        }
    }

    fn apply_spawn(&mut self, packet: EntitySpawnPacket) {
        let mut entity = Entity::new(packet.id, packet.uuid, packet.kind);
        entity.position = packet.position;
        entity.velocity = packet.velocity();
        entity.yaw = packet.yaw();

        if packet.kind == EntityKind::Projectile && !packet.owner.is_none() {
            // seed the owner back-reference if the owner is already shadowed
            let owner_info = self
                .index
                .get(packet.owner)
                .map(|owner| (EntityRef::to_entity(owner), owner.kind()));
            if let (
                Some((owner_ref, owner_kind)),
                EntityState::Projectile { owner, hostile, .. },
            ) = (owner_info, entity.state_mut())
            {
                *owner = Some(owner_ref);
                *hostile = owner_kind == EntityKind::Mob;
            }
        }

        // duplicate identity: the index warns, the duplicate is discarded
        let _ = self.index.insert(entity);
    }

    fn apply_update(&mut self, packet: EntityUpdatePacket) -> Result<(), ClientError> {
        let Some(entity) = self.index.get_mut(packet.id) else {
            // the entity's removal can race an in-flight update
            warn!("update for untracked entity {} dropped", packet.id);
            return Ok(());
        };
        entity.tracker_mut().write_updated_entries(&packet.entries)?;
        Ok(())
    }

    fn apply_remove(&mut self, packet: EntityRemovePacket) {
        // cross-check both keys: the net id may already belong to a newer
        // entity. A remove for an entity already gone is a tolerated no-op.
        match self.index.get(packet.id) {
            Some(entity) if entity.uuid() == packet.uuid => {
                self.index.remove(packet.id);
            }
            _ => {
                if let Some(id) = self.index.id_by_uuid(packet.uuid) {
                    self.index.remove(id);
                }
            }
        }
    }

    fn apply_position(&mut self, packet: EntityPositionPacket) {
        let Some(entity) = self.index.get_mut(packet.id) else {
            warn!("position sync for untracked entity {} dropped", packet.id);
            return;
        };
        entity.position = packet.position;
        entity.velocity = packet.velocity();
        entity.yaw = packet.yaw();
    }

    // the observer tick

    /// One fixed step of the shadow world: drain due timers, then advance
    /// ages and extrapolate positions from last known velocities
    pub fn tick(&mut self) {
        self.time += self.config.tick_delta;
        self.tick_count += 1;
        self.process_timers();

        let dt = self.config.tick_delta;
        for entity in self.index.iter_mut() {
            if entity.is_removed() {
                continue;
            }
            entity.age += 1;
            entity.integrate(dt);
        }
    }
}

impl TimerContext for ClientWorld {
    fn timer_queue(&mut self) -> &mut TimerQueue<Self> {
        &mut self.timers
    }

    fn sim_time(&self) -> f64 {
        self.time
    }
}
