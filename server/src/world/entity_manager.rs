use std::collections::BTreeSet;

use log::warn;

use astra_shared::{Entity, EntityIndex, EntityKind, NetId};

/// Owns the authoritative entity population and its lifecycle.
///
/// On top of the dual-keyed [`EntityIndex`] this maintains typed
/// sub-collections updated incrementally on add/evict, so per-tick queries
/// over one variant never scan the full population, and the pending-removal
/// set that defers eviction to a single sweep per tick.
///
/// State machine per entity: Pending -> Live (only via `add_entity`) ->
/// MarkedForRemoval (`mark_for_removal`, idempotent) -> Evicted (only inside
/// `process_removals`).
pub struct EntityManager {
    index: EntityIndex,
    players: BTreeSet<NetId>,
    mobs: BTreeSet<NetId>,
    projectiles: BTreeSet<NetId>,
    markers: BTreeSet<NetId>,
    pending_removal: BTreeSet<NetId>,
}

impl EntityManager {
    pub fn new() -> Self {
        Self {
            index: EntityIndex::new(),
            players: BTreeSet::new(),
            mobs: BTreeSet::new(),
            projectiles: BTreeSet::new(),
            markers: BTreeSet::new(),
            pending_removal: BTreeSet::new(),
        }
    }

    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut EntityIndex {
        &mut self.index
    }

    fn bucket_mut(&mut self, kind: EntityKind) -> &mut BTreeSet<NetId> {
        match kind {
            EntityKind::Player => &mut self.players,
            EntityKind::Mob => &mut self.mobs,
            EntityKind::Projectile => &mut self.projectiles,
            EntityKind::Marker => &mut self.markers,
        }
    }

    /// Makes an entity live: inserts into the index and its typed bucket in
    /// one transaction. On identity collision nothing is mutated and the
    /// rejected entity comes back to the caller.
    pub fn add_entity(&mut self, entity: Entity) -> Result<NetId, Entity> {
        let id = entity.id();
        let kind = entity.kind();
        self.index.insert(entity)?;
        self.bucket_mut(kind).insert(id);
        Ok(id)
    }

    /// O(1), safe to call while the population is being iterated; the entity
    /// stays live until the next `process_removals`
    pub fn mark_for_removal(&mut self, id: NetId) {
        if self.index.contains(id) {
            self.pending_removal.insert(id);
        } else {
            warn!("mark_for_removal on unindexed entity {id}");
        }
    }

    pub fn has_pending_removals(&self) -> bool {
        !self.pending_removal.is_empty()
    }

    /// Drains the pending set and evicts each entity from the index and its
    /// bucket, returning the evicted records so the caller can run
    /// stop-tracking hooks. Called once per tick, after all entities ticked.
    pub fn process_removals(&mut self) -> Vec<Entity> {
        let pending = std::mem::take(&mut self.pending_removal);
        let mut evicted = Vec::with_capacity(pending.len());
        for id in pending {
            if let Some(entity) = self.index.remove(id) {
                self.bucket_mut(entity.kind()).remove(&id);
                evicted.push(entity);
            }
        }
        evicted
    }

    pub fn players(&self) -> &BTreeSet<NetId> {
        &self.players
    }

    pub fn mobs(&self) -> &BTreeSet<NetId> {
        &self.mobs
    }

    pub fn projectiles(&self) -> &BTreeSet<NetId> {
        &self.projectiles
    }

    pub fn markers(&self) -> &BTreeSet<NetId> {
        &self.markers
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
