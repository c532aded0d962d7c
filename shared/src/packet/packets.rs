use astra_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

use crate::entity::{Entity, EntityKind};
use crate::math::Vec2;
use crate::packet::packet_type::PacketType;
use crate::packet::quant::{decode_velocity, decode_yaw, encode_velocity, encode_yaw};
use crate::tracker::SerializedEntry;
use crate::types::{EntityUuid, NetId};

/// Announces a newly-tracked entity: identity, kind tag, initial spatial
/// state (velocity and yaw quantized), and the owner seed field (`NetId::NONE`
/// for unowned entities).
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpawnPacket {
    pub kind: EntityKind,
    pub id: NetId,
    pub uuid: EntityUuid,
    pub position: Vec2,
    velocity_x: i16,
    velocity_y: i16,
    yaw_byte: u8,
    pub owner: NetId,
}

impl EntitySpawnPacket {
    pub fn create(entity: &Entity, owner: NetId) -> Self {
        Self {
            kind: entity.kind(),
            id: entity.id(),
            uuid: entity.uuid(),
            position: entity.position,
            velocity_x: encode_velocity(entity.velocity.x),
            velocity_y: encode_velocity(entity.velocity.y),
            yaw_byte: encode_yaw(entity.yaw),
            owner,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(
            decode_velocity(self.velocity_x),
            decode_velocity(self.velocity_y),
        )
    }

    pub fn yaw(&self) -> f64 {
        decode_yaw(self.yaw_byte)
    }
}

impl Serde for EntitySpawnPacket {
    fn ser(&self, writer: &mut ByteWriter) {
        self.kind.ser(writer);
        self.id.ser(writer);
        self.uuid.ser(writer);
        self.position.ser(writer);
        writer.write_i16(self.velocity_x);
        writer.write_i16(self.velocity_y);
        writer.write_u8(self.yaw_byte);
        self.owner.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            kind: EntityKind::de(reader)?,
            id: NetId::de(reader)?,
            uuid: EntityUuid::de(reader)?,
            position: Vec2::de(reader)?,
            velocity_x: reader.read_i16()?,
            velocity_y: reader.read_i16()?,
            yaw_byte: reader.read_u8()?,
            owner: NetId::de(reader)?,
        })
    }
}

/// One drained change-set: the entity's net id, the count of changed slots,
/// then each `(slot id, kind id, payload)` triple
#[derive(Debug, Clone, PartialEq)]
pub struct EntityUpdatePacket {
    pub id: NetId,
    pub entries: Vec<SerializedEntry>,
}

impl EntityUpdatePacket {
    pub fn new(id: NetId, entries: Vec<SerializedEntry>) -> Self {
        debug_assert!(entries.len() <= usize::from(u8::MAX));
        Self { id, entries }
    }
}

impl Serde for EntityUpdatePacket {
    fn ser(&self, writer: &mut ByteWriter) {
        self.id.ser(writer);
        writer.write_u8(self.entries.len() as u8);
        for entry in &self.entries {
            entry.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let id = NetId::de(reader)?;
        let count = reader.read_u8()?;
        let mut entries = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            entries.push(SerializedEntry::de(reader)?);
        }
        Ok(Self { id, entries })
    }
}

/// Eviction notice. Carries both keys so the observer can cross-check against
/// id reuse; a remove for an entity already gone is tolerated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityRemovePacket {
    pub id: NetId,
    pub uuid: EntityUuid,
}

impl Serde for EntityRemovePacket {
    fn ser(&self, writer: &mut ByteWriter) {
        self.id.ser(writer);
        self.uuid.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            id: NetId::de(reader)?,
            uuid: EntityUuid::de(reader)?,
        })
    }
}

/// Forced absolute resync of spatial state, sent when the quantized delta
/// overflows its wire range or on the periodic cadence
#[derive(Debug, Clone, PartialEq)]
pub struct EntityPositionPacket {
    pub id: NetId,
    pub position: Vec2,
    velocity_x: i16,
    velocity_y: i16,
    yaw_byte: u8,
}

impl EntityPositionPacket {
    pub fn create(entity: &Entity) -> Self {
        Self {
            id: entity.id(),
            position: entity.position,
            velocity_x: encode_velocity(entity.velocity.x),
            velocity_y: encode_velocity(entity.velocity.y),
            yaw_byte: encode_yaw(entity.yaw),
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(
            decode_velocity(self.velocity_x),
            decode_velocity(self.velocity_y),
        )
    }

    pub fn yaw(&self) -> f64 {
        decode_yaw(self.yaw_byte)
    }
}

impl Serde for EntityPositionPacket {
    fn ser(&self, writer: &mut ByteWriter) {
        self.id.ser(writer);
        self.position.ser(writer);
        writer.write_i16(self.velocity_x);
        writer.write_i16(self.velocity_y);
        writer.write_u8(self.yaw_byte);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            id: NetId::de(reader)?,
            position: Vec2::de(reader)?,
            velocity_x: reader.read_i16()?,
            velocity_y: reader.read_i16()?,
            yaw_byte: reader.read_u8()?,
        })
    }
}

/// A complete wire message: type byte followed by the message body
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Spawn(EntitySpawnPacket),
    Update(EntityUpdatePacket),
    Remove(EntityRemovePacket),
    Position(EntityPositionPacket),
}

impl Packet {
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Spawn(_) => PacketType::EntitySpawn,
            Packet::Update(_) => PacketType::EntityUpdate,
            Packet::Remove(_) => PacketType::EntityRemove,
            Packet::Position(_) => PacketType::EntityPosition,
        }
    }

    /// Serializes the full message, type byte included
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.ser(&mut writer);
        writer.to_bytes()
    }
}

impl Serde for Packet {
    fn ser(&self, writer: &mut ByteWriter) {
        self.packet_type().ser(writer);
        match self {
            Packet::Spawn(p) => p.ser(writer),
            Packet::Update(p) => p.ser(writer),
            Packet::Remove(p) => p.ser(writer),
            Packet::Position(p) => p.ser(writer),
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(match PacketType::de(reader)? {
            PacketType::EntitySpawn => Packet::Spawn(EntitySpawnPacket::de(reader)?),
            PacketType::EntityUpdate => Packet::Update(EntityUpdatePacket::de(reader)?),
            PacketType::EntityRemove => Packet::Remove(EntityRemovePacket::de(reader)?),
            PacketType::EntityPosition => Packet::Position(EntityPositionPacket::de(reader)?),
        })
    }
}
