//! # Astra Server
//! The authoritative side of the simulation: owns the world state, advances
//! it in fixed steps, and replicates entity spawns, dirty-field change-sets
//! and removals to observers through a fire-and-forget packet sink.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod shared {
    pub use astra_shared::{
        data, ByteReader, ByteWriter, Entity, EntityIndex, EntityKind, EntityRef, EntityState,
        EntityUuid, KeyGenerator, NetId, Packet, PacketSink, Serde, SerdeErr, SessionConfig,
        SessionId, TimerContext, TimerHandle, Vec2, WorldConfig,
    };
}

mod session;
mod world;

pub use session::SessionManager;
pub use world::{EntityManager, ServerWorld, TrackerEntry};
