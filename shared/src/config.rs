/// Contains config properties which will be used by a world
#[derive(Clone)]
pub struct WorldConfig {
    /// Simulated seconds each tick advances; real-time pacing is the caller's
    /// responsibility
    pub tick_delta: f64,
    /// Playfield bounds entities are simulated within
    pub world_width: f64,
    pub world_height: f64,
    /// Forced position resync after this many update-bearing ticks, even when
    /// the quantized delta stays in range
    pub position_sync_interval: u32,
    /// Ceiling of the entity net-id space; ids wrap and recycle under it
    pub entity_id_ceiling: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tick_delta: 1.0 / 60.0,
            world_width: 1692.0,
            world_height: 1030.0,
            position_sync_interval: 400,
            entity_id_ceiling: 0xFFFF,
        }
    }
}

/// Contains config properties for the connection-acceptance path
#[derive(Clone)]
pub struct SessionConfig {
    /// Ceiling of the session id space; allocation past it is refused
    pub max_sessions: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { max_sessions: 64 }
    }
}
