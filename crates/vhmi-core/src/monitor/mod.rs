//! Data-freshness monitoring
//!
//! - [`SequenceTracker`] flags gaps in the vehicle state counter
//! - [`StalenessMonitor`] flags watched signals that went silent
//! - [`ArrivalTable`] holds the per-identifier arrival times both rely on

mod arrival;
mod sequence;
mod staleness;

pub use arrival::ArrivalTable;
pub use sequence::{SequenceGap, SequenceState, SequenceTracker};
pub use staleness::{StaleSignal, StalenessConfig, StalenessMonitor, WatchConfig};
