use thiserror::Error;

use super::tracked_value::TrackedKind;

/// Errors raised while applying a decoded change-set to a local slot table.
///
/// These are decode-level failures: the entry names a slot or kind the local
/// schema does not have, and applying it would desynchronize the shadow state.
/// They are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// The change-set names a slot outside the local table
    #[error("slot {slot} is not registered in a table of {len} slot(s)")]
    UnknownSlot { slot: u8, len: usize },

    /// The change-set carries a value whose kind differs from the local slot's
    #[error("slot {slot} holds {expected} values but the update carried {got}")]
    KindMismatch {
        slot: u8,
        expected: &'static str,
        got: &'static str,
    },
}

impl TrackerError {
    pub(crate) fn kind_mismatch(slot: u8, expected: TrackedKind, got: TrackedKind) -> Self {
        Self::KindMismatch {
            slot,
            expected: expected.name(),
            got: got.name(),
        }
    }
}
