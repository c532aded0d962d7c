use astra_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

/// The closed set of value-type codecs a slot can carry.
///
/// The kind <-> id mapping is fixed at compile time; decoding an id outside
/// this table is a fatal decode error, since applying a value of unknown type
/// would desynchronize the shadow copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedKind {
    Bool,
    Int8,
    VarUint,
    Float,
    Double,
}

impl TrackedKind {
    pub fn id(self) -> u64 {
        match self {
            TrackedKind::Bool => 0,
            TrackedKind::Int8 => 1,
            TrackedKind::VarUint => 2,
            TrackedKind::Float => 3,
            TrackedKind::Double => 4,
        }
    }

    pub fn from_id(id: u64) -> Option<Self> {
        match id {
            0 => Some(TrackedKind::Bool),
            1 => Some(TrackedKind::Int8),
            2 => Some(TrackedKind::VarUint),
            3 => Some(TrackedKind::Float),
            4 => Some(TrackedKind::Double),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TrackedKind::Bool => "Bool",
            TrackedKind::Int8 => "Int8",
            TrackedKind::VarUint => "VarUint",
            TrackedKind::Float => "Float",
            TrackedKind::Double => "Double",
        }
    }
}

/// A value stored in a tracked slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackedValue {
    Bool(bool),
    Int8(i8),
    VarUint(u64),
    Float(f32),
    Double(f64),
}

impl TrackedValue {
    pub fn kind(&self) -> TrackedKind {
        match self {
            TrackedValue::Bool(_) => TrackedKind::Bool,
            TrackedValue::Int8(_) => TrackedKind::Int8,
            TrackedValue::VarUint(_) => TrackedKind::VarUint,
            TrackedValue::Float(_) => TrackedKind::Float,
            TrackedValue::Double(_) => TrackedKind::Double,
        }
    }

    fn ser_payload(&self, writer: &mut ByteWriter) {
        match self {
            TrackedValue::Bool(v) => writer.write_bool(*v),
            TrackedValue::Int8(v) => writer.write_i8(*v),
            TrackedValue::VarUint(v) => writer.write_var_uint(*v),
            TrackedValue::Float(v) => writer.write_f32(*v),
            TrackedValue::Double(v) => writer.write_f64(*v),
        }
    }

    fn de_payload(kind: TrackedKind, reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(match kind {
            TrackedKind::Bool => TrackedValue::Bool(reader.read_bool()?),
            TrackedKind::Int8 => TrackedValue::Int8(reader.read_i8()?),
            TrackedKind::VarUint => TrackedValue::VarUint(reader.read_var_uint()?),
            TrackedKind::Float => TrackedValue::Float(reader.read_f32()?),
            TrackedKind::Double => TrackedValue::Double(reader.read_f64()?),
        })
    }
}

/// One changed-entry triple as it travels the wire: slot id (one byte), the
/// value-kind id (var-uint), then the kind-specific payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerializedEntry {
    pub slot: u8,
    pub value: TrackedValue,
}

impl SerializedEntry {
    pub fn new(slot: u8, value: TrackedValue) -> Self {
        Self { slot, value }
    }
}

impl Serde for SerializedEntry {
    fn ser(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.slot);
        writer.write_var_uint(self.value.kind().id());
        self.value.ser_payload(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let slot = reader.read_u8()?;
        let kind_id = reader.read_var_uint()?;
        let kind = TrackedKind::from_id(kind_id).ok_or(SerdeErr::UnknownId {
            what: "tracked value kind",
            id: kind_id,
        })?;
        let value = TrackedValue::de_payload(kind, reader)?;
        Ok(Self { slot, value })
    }
}
