use astra_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

/// One-byte discriminant leading every wire message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    EntitySpawn,
    EntityUpdate,
    EntityRemove,
    EntityPosition,
}

impl PacketType {
    fn id(self) -> u8 {
        match self {
            PacketType::EntitySpawn => 0,
            PacketType::EntityUpdate => 1,
            PacketType::EntityRemove => 2,
            PacketType::EntityPosition => 3,
        }
    }

    fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(PacketType::EntitySpawn),
            1 => Some(PacketType::EntityUpdate),
            2 => Some(PacketType::EntityRemove),
            3 => Some(PacketType::EntityPosition),
            _ => None,
        }
    }
}

impl Serde for PacketType {
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.id());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let id = reader.read_u8()?;
        PacketType::from_id(id).ok_or(SerdeErr::UnknownId {
            what: "packet type",
            id: u64::from(id),
        })
    }
}
