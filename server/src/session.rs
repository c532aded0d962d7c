use std::collections::BTreeSet;

use log::warn;

use astra_shared::{KeyGenerator, SessionConfig, SessionId};

/// Session bookkeeping for the connection-acceptance path.
///
/// Session ids come from their own [`KeyGenerator`] instance: the id space is
/// unrelated to entity net ids, but follows the same free-list-then-counter
/// discipline and the same exhaustion contract.
pub struct SessionManager {
    ids: KeyGenerator<SessionId>,
    active: BTreeSet<SessionId>,
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            ids: KeyGenerator::new(config.max_sessions),
            active: BTreeSet::new(),
        }
    }

    /// Accepts a new connection, or refuses it (`None`) when the session id
    /// space is exhausted
    pub fn accept(&mut self) -> Option<SessionId> {
        let Some(id) = self.ids.allocate() else {
            warn!("connection refused: session id space exhausted");
            return None;
        };
        self.active.insert(id);
        Some(id)
    }

    /// Releases a session's id back to the free list; unknown ids are ignored
    pub fn release(&mut self, id: SessionId) {
        if self.active.remove(&id) {
            self.ids.deallocate(id);
        }
    }

    pub fn is_active(&self, id: SessionId) -> bool {
        self.active.contains(&id)
    }

    pub fn count(&self) -> usize {
        self.active.len()
    }
}
