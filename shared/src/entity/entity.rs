use std::fmt;

use crate::entity::{EntityKind, EntityRef};
use crate::math::{circles_overlap, Vec2};
use crate::tracker::DataTracker;
use crate::types::{EntityUuid, NetId};

/// Tracked-slot layout shared by every entity class.
///
/// Slot ids form one contiguous space down the hierarchy: base entity slots
/// first, living slots next, player slots after, so a subclass's slots never
/// collide with its base's. Every declared slot must be populated by
/// [`build_tracker`] or construction panics.
pub mod data {
    use crate::tracker::TrackedData;

    /// Replicated bit flags, present on every entity
    pub const FLAGS: TrackedData<i8> = TrackedData::new(0);
    /// Living entities (players, mobs)
    pub const HEALTH: TrackedData<f32> = TrackedData::new(1);
    /// Players only
    pub const SCORE: TrackedData<u64> = TrackedData::new(2);

    pub const FLAG_INVULNERABLE: i8 = 0x01;
    pub const FLAG_DECOY: i8 = 0x02;

    /// Slot table size for a kind; base + living + player blocks
    pub(super) fn slot_count(kind: super::EntityKind) -> usize {
        match kind {
            super::EntityKind::Player => 3,
            super::EntityKind::Mob => 2,
            super::EntityKind::Projectile | super::EntityKind::Marker => 1,
        }
    }
}

fn build_tracker(kind: EntityKind) -> DataTracker {
    let mut builder = DataTracker::builder(kind.name(), data::slot_count(kind));
    builder = builder.add(data::FLAGS, 0);
    if kind.is_living() {
        builder = builder.add(data::HEALTH, base_health(kind));
    }
    if kind == EntityKind::Player {
        builder = builder.add(data::SCORE, 0u64);
    }
    builder.build()
}

fn base_health(kind: EntityKind) -> f32 {
    match kind {
        EntityKind::Player => 100.0,
        EntityKind::Mob => 20.0,
        EntityKind::Projectile | EntityKind::Marker => 0.0,
    }
}

/// Variant-specific simulation state, selected by the entity's kind tag
#[derive(Debug, Clone)]
pub enum EntityState {
    Player,
    Mob {
        contact_damage: f32,
    },
    Projectile {
        owner: Option<EntityRef>,
        /// Which side fired it, resolved once at creation; hit routing is a
        /// tag comparison, never a per-tick owner lookup
        hostile: bool,
        lock_target: Option<EntityRef>,
        /// Remaining lifetime in ticks; the projectile discards itself at zero
        life: u32,
        damage: f32,
        /// Interceptor rounds also collide with opposing projectiles
        intercepts: bool,
    },
    Marker {
        /// Ticks until self-discard; zero keeps the marker alive forever
        ttl: u32,
    },
}

impl EntityState {
    fn default_for(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Player => EntityState::Player,
            EntityKind::Mob => EntityState::Mob {
                contact_damage: 10.0,
            },
            EntityKind::Projectile => EntityState::Projectile {
                owner: None,
                hostile: false,
                lock_target: None,
                life: 300,
                damage: 5.0,
                intercepts: false,
            },
            EntityKind::Marker => EntityState::Marker { ttl: 0 },
        }
    }
}

/// The base unit of simulation.
///
/// An entity is created by a factory bound to its kind tag and becomes live
/// only once accepted by the index. `discard` marks it logically dead
/// immediately, but it stays indexed until the lifecycle sweep so a tick can
/// safely iterate while entities are discarded from within that iteration.
pub struct Entity {
    id: NetId,
    uuid: EntityUuid,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Heading in radians
    pub yaw: f64,
    /// Ticks since creation; monotonic until removal
    pub age: u64,
    removed: bool,
    kind: EntityKind,
    state: EntityState,
    tracker: DataTracker,
}

impl Entity {
    pub fn new(id: NetId, uuid: EntityUuid, kind: EntityKind) -> Self {
        Self {
            id,
            uuid,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            yaw: 0.0,
            age: 0,
            removed: false,
            kind,
            state: EntityState::default_for(kind),
            tracker: build_tracker(kind),
        }
    }

    pub fn id(&self) -> NetId {
        self.id
    }

    pub fn uuid(&self) -> EntityUuid {
        self.uuid
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn state(&self) -> &EntityState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    pub fn tracker(&self) -> &DataTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut DataTracker {
        &mut self.tracker
    }

    pub fn radius(&self) -> f64 {
        self.kind.radius()
    }

    /// Marks the entity for removal. Idempotent, irreversible; the record
    /// stays indexed until the next lifecycle sweep evicts it.
    pub fn discard(&mut self) {
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Advances position by one fixed step
    pub fn integrate(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    pub fn collides_with(&self, other: &Entity) -> bool {
        circles_overlap(self.position, self.radius(), other.position, other.radius())
    }

    // flag helpers route through the tracker so the bits replicate

    fn flags(&self) -> i8 {
        self.tracker.get(data::FLAGS)
    }

    fn set_flag(&mut self, flag: i8, on: bool) {
        let flags = self.flags();
        let next = if on { flags | flag } else { flags & !flag };
        self.tracker.set(data::FLAGS, next);
    }

    pub fn is_invulnerable(&self) -> bool {
        self.flags() & data::FLAG_INVULNERABLE != 0
    }

    pub fn set_invulnerable(&mut self, on: bool) {
        self.set_flag(data::FLAG_INVULNERABLE, on);
    }

    pub fn is_decoy(&self) -> bool {
        self.flags() & data::FLAG_DECOY != 0
    }

    pub fn set_decoy(&mut self, on: bool) {
        self.set_flag(data::FLAG_DECOY, on);
    }

    pub fn health(&self) -> f32 {
        if self.kind.is_living() {
            self.tracker.get(data::HEALTH)
        } else {
            0.0
        }
    }

    /// Applies damage through the tracked health slot; discards the entity
    /// when health reaches zero. Returns whether this hit was lethal.
    /// Invulnerable and non-living entities shrug the hit off.
    pub fn damage(&mut self, amount: f32) -> bool {
        if !self.kind.is_living() || self.is_invulnerable() || self.removed {
            return false;
        }
        let health = (self.tracker.get(data::HEALTH) - amount).max(0.0);
        self.tracker.set(data::HEALTH, health);
        if health <= 0.0 {
            self.discard();
            return true;
        }
        false
    }
}

// the tracker's hook is opaque; identity and spatial state are what matter in
// panics and logs
impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("uuid", &self.uuid)
            .field("kind", &self.kind)
            .field("position", &self.position)
            .field("age", &self.age)
            .field("removed", &self.removed)
            .finish_non_exhaustive()
    }
}
