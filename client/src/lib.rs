//! # Astra Client
//! The observer side of the simulation: a shadow world that applies
//! authoritative change-sets and never originates mutations for replicated
//! attributes.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod shared {
    pub use astra_shared::{
        data, ByteReader, ByteWriter, Entity, EntityIndex, EntityKind, EntityUuid, NetId, Packet,
        Serde, SerdeErr, TimerContext, TimerHandle, Vec2, WorldConfig,
    };
}

mod error;
mod world;

pub use error::ClientError;
pub use world::ClientWorld;
