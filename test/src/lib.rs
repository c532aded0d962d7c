//! Helpers for end-to-end tests: an authoritative world wired to an observer
//! through the in-memory loopback sink.

use astra_client::ClientWorld;
use astra_server::ServerWorld;
use astra_shared::{BufferSink, EntityKind, NetId, Vec2, WorldConfig};

pub struct Harness {
    pub server: ServerWorld<BufferSink>,
    pub client: ClientWorld,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            server: ServerWorld::new(config.clone(), BufferSink::new()),
            client: ClientWorld::new(config),
        }
    }

    /// Delivers every buffered authoritative packet to the observer
    pub fn pump(&mut self) {
        for bytes in self.server.sink_mut().drain() {
            self.client
                .receive(&bytes)
                .expect("observer rejected an authoritative packet");
        }
    }

    /// One synchronized step: the authoritative world ticks, its packets are
    /// delivered, then the shadow world ticks
    pub fn step(&mut self) {
        self.server.tick();
        self.pump();
        self.client.tick();
    }

    pub fn spawn(&mut self, kind: EntityKind, x: f64, y: f64) -> NetId {
        let mut entity = self
            .server
            .create_entity(kind)
            .expect("net id space exhausted");
        entity.position = Vec2::new(x, y);
        let id = entity.id();
        assert!(self.server.spawn_entity(entity));
        id
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
