use thiserror::Error;

use astra_shared::{SerdeErr, TrackerError};

/// Errors raised while applying authoritative packets to the shadow world.
///
/// All variants are decode-level: the data names something the local schema
/// does not have, and accepting it silently would desynchronize the shadow
/// state with no recovery path. They terminate the receive operation and are
/// never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error(transparent)]
    Serde(#[from] SerdeErr),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
