use astra_shared::{
    encode_velocity, encode_yaw, Entity, EntityPositionPacket, EntityUpdatePacket, Packet,
    PacketSink, Vec2, WorldConfig,
};

/// Fixed-point scale the position delta is judged in
const POSITION_QUANT: f64 = 4096.0;
/// Per-axis delta ceiling before an absolute resync is forced
const POSITION_DELTA_LIMIT: i64 = 32768;

fn quant_delta(a: f64, b: f64) -> i64 {
    (a * POSITION_QUANT).round() as i64 - (b * POSITION_QUANT).round() as i64
}

/// Per-entity replication state on the authoritative side.
///
/// Each sync tick this drains the entity's dirty change-set into an update
/// packet — exactly once, since draining clears the dirty bits — and decides
/// whether spatial state needs an absolute resync: when the quantized delta
/// from the last synced position overflows its wire range, when quantized
/// velocity or yaw changed, or on the periodic cadence.
pub struct TrackerEntry {
    tracked_position: Vec2,
    tracked_velocity: Vec2,
    tracked_yaw: f64,
    updates: u32,
}

impl TrackerEntry {
    pub fn new(entity: &Entity) -> Self {
        Self {
            tracked_position: entity.position,
            tracked_velocity: entity.velocity,
            tracked_yaw: entity.yaw,
            updates: 0,
        }
    }

    pub fn tick<S: PacketSink>(
        &mut self,
        entity: &mut Entity,
        sink: &mut S,
        config: &WorldConfig,
    ) {
        if let Some(entries) = entity.tracker_mut().dirty_entries() {
            sink.send_packet(&Packet::Update(EntityUpdatePacket::new(entity.id(), entries)));
        }

        self.updates += 1;

        let dx = quant_delta(entity.position.x, self.tracked_position.x);
        let dy = quant_delta(entity.position.y, self.tracked_position.y);
        let overflow = dx.abs() > POSITION_DELTA_LIMIT || dy.abs() > POSITION_DELTA_LIMIT;

        let motion_changed = encode_velocity(entity.velocity.x)
            != encode_velocity(self.tracked_velocity.x)
            || encode_velocity(entity.velocity.y) != encode_velocity(self.tracked_velocity.y)
            || encode_yaw(entity.yaw) != encode_yaw(self.tracked_yaw);

        if overflow || motion_changed || self.updates >= config.position_sync_interval {
            self.updates = 0;
            self.tracked_position = entity.position;
            self.tracked_velocity = entity.velocity;
            self.tracked_yaw = entity.yaw;
            sink.send_packet(&Packet::Position(EntityPositionPacket::create(entity)));
        }
    }
}
