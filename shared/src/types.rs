use std::fmt;

use astra_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

/// Process-local entity handle; recycled after removal, so only unique among
/// currently-live entities. `0` is the reserved "no entity" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetId(u32);

impl NetId {
    pub const NONE: NetId = NetId(0);

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for NetId {
    fn from(value: u32) -> Self {
        NetId(value)
    }
}

impl From<NetId> for u32 {
    fn from(value: NetId) -> Self {
        value.0
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Serde for NetId {
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_var_uint(u64::from(self.0));
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let raw = reader.read_var_uint()?;
        let id = u32::try_from(raw).map_err(|_| SerdeErr::UnknownId {
            what: "net id",
            id: raw,
        })?;
        Ok(NetId(id))
    }
}

/// Globally unique 128-bit entity identity, stable across network boundaries
/// and persistence. Never recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityUuid(u128);

impl EntityUuid {
    pub fn from_raw(raw: u128) -> Self {
        EntityUuid(raw)
    }

    pub fn raw(self) -> u128 {
        self.0
    }
}

impl fmt::Display for EntityUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl Serde for EntityUuid {
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_u128(self.0);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(EntityUuid(reader.read_u128()?))
    }
}

/// Session handle issued on connection acceptance; drawn from its own
/// [`KeyGenerator`](crate::KeyGenerator) instance, unrelated to entity ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u32);

impl SessionId {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for SessionId {
    fn from(value: u32) -> Self {
        SessionId(value)
    }
}

impl From<SessionId> for u32 {
    fn from(value: SessionId) -> Self {
        value.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}
