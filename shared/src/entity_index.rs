use std::collections::{BTreeMap, HashMap};

use log::warn;

use crate::entity::Entity;
use crate::types::{EntityUuid, NetId};

/// The single point of truth for "is this id live": owns every live entity,
/// keyed both by recycled net id and by stable uuid.
///
/// Invariant: an entity is present in both mappings or in neither. Insertion
/// fails without side effects when either key is already taken; the caller
/// discards the duplicate (warning-level condition, not fatal).
pub struct EntityIndex {
    by_id: BTreeMap<NetId, Entity>,
    by_uuid: HashMap<EntityUuid, NetId>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self {
            by_id: BTreeMap::new(),
            by_uuid: HashMap::new(),
        }
    }

    /// Inserts a new live entity. On id or uuid collision the index is left
    /// untouched and the rejected entity is handed back for the caller to
    /// discard or force-evict the existing holder first.
    pub fn insert(&mut self, entity: Entity) -> Result<(), Entity> {
        if self.by_uuid.contains_key(&entity.uuid()) {
            warn!("duplicate entity uuid {}: {}", entity.uuid(), entity.id());
            return Err(entity);
        }
        if self.by_id.contains_key(&entity.id()) {
            warn!("duplicate entity net id {}", entity.id());
            return Err(entity);
        }

        self.by_uuid.insert(entity.uuid(), entity.id());
        self.by_id.insert(entity.id(), entity);
        Ok(())
    }

    pub fn contains(&self, id: NetId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn get(&self, id: NetId) -> Option<&Entity> {
        self.by_id.get(&id)
    }

    pub fn get_mut(&mut self, id: NetId) -> Option<&mut Entity> {
        self.by_id.get_mut(&id)
    }

    pub fn id_by_uuid(&self, uuid: EntityUuid) -> Option<NetId> {
        self.by_uuid.get(&uuid).copied()
    }

    pub fn get_by_uuid(&self, uuid: EntityUuid) -> Option<&Entity> {
        self.by_id.get(&self.by_uuid.get(&uuid).copied()?)
    }

    /// Evicts an entity, maintaining both mappings in one step
    pub fn remove(&mut self, id: NetId) -> Option<Entity> {
        let entity = self.by_id.remove(&id)?;
        self.by_uuid.remove(&entity.uuid());
        Some(entity)
    }

    /// Lifts an entity out for the duration of its own tick; pair with
    /// `put_back`. While out, lookups miss it — only the currently-ticking
    /// entity is ever held this way.
    pub fn take(&mut self, id: NetId) -> Option<Entity> {
        self.remove(id)
    }

    /// Returns a ticked entity to the index
    pub fn put_back(&mut self, entity: Entity) {
        debug_assert!(!self.by_id.contains_key(&entity.id()));
        self.by_uuid.insert(entity.uuid(), entity.id());
        self.by_id.insert(entity.id(), entity);
    }

    /// Live net ids in index-stable (ascending) order
    pub fn ids(&self) -> Vec<NetId> {
        self.by_id.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.by_id.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.by_id.values_mut()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_uuid.clear();
    }
}

impl Default for EntityIndex {
    fn default() -> Self {
        Self::new()
    }
}
