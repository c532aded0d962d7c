use crate::entity::Entity;
use crate::entity_index::EntityIndex;
use crate::types::{EntityUuid, NetId};

/// Weak back-reference to another entity (projectile owner, lock target).
///
/// Holds the stable uuid plus a cached net id that is re-validated on every
/// resolution: because net ids are recycled, a cached id can silently bind to
/// a different, newer entity, so the uuid is always cross-checked before the
/// cache is trusted. A miss — the target no longer indexed — is a normal,
/// expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef {
    uuid: EntityUuid,
    cached_id: Option<NetId>,
}

impl EntityRef {
    pub fn new(uuid: EntityUuid, id: NetId) -> Self {
        Self {
            uuid,
            cached_id: Some(id),
        }
    }

    pub fn from_uuid(uuid: EntityUuid) -> Self {
        Self {
            uuid,
            cached_id: None,
        }
    }

    /// Points at an entity that is currently in hand
    pub fn to_entity(entity: &Entity) -> Self {
        Self::new(entity.uuid(), entity.id())
    }

    pub fn uuid(&self) -> EntityUuid {
        self.uuid
    }

    /// The cached net id, if any; may be stale until the next `resolve`
    pub fn cached_id(&self) -> Option<NetId> {
        self.cached_id
    }

    /// Resolves the live net id through the index, refreshing the cache.
    /// Returns `None` when the target is no longer indexed or already marked
    /// removed — a dead target breaks the lock immediately.
    pub fn resolve_id(&mut self, index: &EntityIndex) -> Option<NetId> {
        if let Some(id) = self.cached_id {
            if let Some(entity) = index.get(id) {
                if entity.uuid() == self.uuid {
                    if entity.is_removed() {
                        return None;
                    }
                    return Some(id);
                }
            }
            // stale: the id was recycled or the target evicted
            self.cached_id = None;
        }

        let id = index.id_by_uuid(self.uuid)?;
        if index.get(id).is_some_and(Entity::is_removed) {
            return None;
        }
        self.cached_id = Some(id);
        Some(id)
    }

    /// Resolves the referenced entity, refreshing the cache
    pub fn resolve<'a>(&mut self, index: &'a EntityIndex) -> Option<&'a Entity> {
        let id = self.resolve_id(index)?;
        index.get(id)
    }
}
