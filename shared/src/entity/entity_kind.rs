use astra_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

/// Closed variant tag for every simulated entity.
///
/// Resolved once at creation and stored on the record, so collision and
/// sub-collection routing is a tag comparison rather than a runtime type test
/// repeated every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Mob,
    Projectile,
    Marker,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Player,
        EntityKind::Mob,
        EntityKind::Projectile,
        EntityKind::Marker,
    ];

    pub fn id(self) -> u64 {
        match self {
            EntityKind::Player => 0,
            EntityKind::Mob => 1,
            EntityKind::Projectile => 2,
            EntityKind::Marker => 3,
        }
    }

    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            0 => Some(EntityKind::Player),
            1 => Some(EntityKind::Mob),
            2 => Some(EntityKind::Projectile),
            3 => Some(EntityKind::Marker),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Mob => "mob",
            EntityKind::Projectile => "projectile",
            EntityKind::Marker => "marker",
        }
    }

    /// Collision radius of this kind's body
    pub fn radius(self) -> f64 {
        match self {
            EntityKind::Player => 16.0,
            EntityKind::Mob => 14.0,
            EntityKind::Projectile => 4.0,
            EntityKind::Marker => 10.0,
        }
    }

    /// Whether this kind carries a health slot
    pub fn is_living(self) -> bool {
        matches!(self, EntityKind::Player | EntityKind::Mob)
    }
}

impl Serde for EntityKind {
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_var_uint(self.id());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let id = reader.read_var_uint()?;
        EntityKind::from_id(id).ok_or(SerdeErr::UnknownId {
            what: "entity kind",
            id,
        })
    }
}
