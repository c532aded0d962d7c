//! Entity spawn/update/remove wire messages, authoritative -> observer.

mod packet_type;
mod packets;
mod quant;

pub use packet_type::PacketType;
pub use packets::{
    EntityPositionPacket, EntityRemovePacket, EntitySpawnPacket, EntityUpdatePacket, Packet,
};
pub use quant::{decode_velocity, decode_yaw, encode_velocity, encode_yaw};
