//! # Astra Shared
//! Common functionality shared between astra-server & astra-client crates:
//! entity records and their dirty-field trackers, the dual-keyed entity
//! index, id allocation, the timer queue, and the binary wire protocol.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use astra_serde::{var_uint_size, ByteReader, ByteWriter, Serde, SerdeErr};

mod config;
mod entity;
mod entity_index;
mod key_generator;
mod math;
mod packet;
mod timer;
mod tracker;
mod transport;
mod types;

pub use config::{SessionConfig, WorldConfig};
pub use entity::{data, Entity, EntityKind, EntityRef, EntityState};
pub use entity_index::EntityIndex;
pub use key_generator::{KeyGenerator, NULL_KEY};
pub use math::{circles_overlap, Vec2};
pub use packet::{
    decode_velocity, decode_yaw, encode_velocity, encode_yaw, EntityPositionPacket,
    EntityRemovePacket, EntitySpawnPacket, EntityUpdatePacket, Packet, PacketType,
};
pub use timer::{TimerContext, TimerHandle, TimerId, TimerQueue, TimerTask};
pub use tracker::{
    DataTracker, DataTrackerBuilder, SerializedEntry, TrackedData, TrackedKind, TrackedType,
    TrackedValue, TrackerError, MAX_SLOT_ID,
};
pub use transport::{BufferSink, PacketSink};
pub use types::{EntityUuid, NetId, SessionId};
