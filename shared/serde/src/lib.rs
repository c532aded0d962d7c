//! # Astra Serde
//! Byte-level serialization primitives shared by the astra-server &
//! astra-client crates. The wire format is byte-aligned: single-byte tags,
//! LEB128 variable-length unsigned integers, and big-endian multi-byte
//! scalars.

mod error;
mod reader;
mod serde;
mod writer;

pub use error::SerdeErr;
pub use reader::ByteReader;
pub use serde::Serde;
pub use writer::{var_uint_size, ByteWriter};
