use crate::{ByteReader, ByteWriter, SerdeErr};

/// A type that can be written to and read from the wire.
///
/// `ser` is infallible (the buffer grows as needed); `de` fails on truncated
/// or malformed input.
pub trait Serde: Sized {
    fn ser(&self, writer: &mut ByteWriter);
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;
}

macro_rules! impl_serde_scalar {
    ($type:ty, $write:ident, $read:ident) => {
        impl Serde for $type {
            fn ser(&self, writer: &mut ByteWriter) {
                writer.$write(*self);
            }

            fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                reader.$read()
            }
        }
    };
}

impl_serde_scalar!(bool, write_bool, read_bool);
impl_serde_scalar!(u8, write_u8, read_u8);
impl_serde_scalar!(i8, write_i8, read_i8);
impl_serde_scalar!(u16, write_u16, read_u16);
impl_serde_scalar!(i16, write_i16, read_i16);
impl_serde_scalar!(u32, write_u32, read_u32);
impl_serde_scalar!(u64, write_u64, read_u64);
impl_serde_scalar!(u128, write_u128, read_u128);
impl_serde_scalar!(f32, write_f32, read_f32);
impl_serde_scalar!(f64, write_f64, read_f64);
