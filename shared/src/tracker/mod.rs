//! Dirty-field tracking: per-entity slot tables of typed values whose changes
//! are drained into compact change-sets once per synchronization point.

mod data_tracker;
mod error;
mod tracked_data;
mod tracked_value;

pub use data_tracker::{DataTracker, DataTrackerBuilder};
pub use error::TrackerError;
pub use tracked_data::{TrackedData, TrackedType};
pub use tracked_value::{SerializedEntry, TrackedKind, TrackedValue};

/// Highest allowed slot id; one byte on the wire
pub const MAX_SLOT_ID: u8 = 254;
