//! vhmi-core - Decode, track and detect for the vehicle HMI service
//!
//! This crate turns raw bus frames into a live vehicle snapshot and watches
//! the incoming stream for freshness failures.
//!
//! # Architecture
//!
//! ```text
//!   CanFrame ──► Dispatcher ──► decoders ──► StateStore ◄── query surface
//!                   │                                        (read-only)
//!                   ├──► SequenceTracker (0x600 only) ─┐
//!                   │                                   ├──► Integrity
//!                   └──► ArrivalTable ◄── StalenessMonitor ─┘   (warn, count,
//!                                          (every 100ms)          broadcast)
//! ```

pub mod decode;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod integrity;
pub mod models;
pub mod monitor;
pub mod store;

pub use decode::{decode_fault_status, decode_metric, decode_vehicle_state, MetricUpdate};
pub use dispatch::{Dispatcher, FrameOutcome};
pub use error::{ConfigError, DecodeError, DecodeResult, FrameError};
pub use frame::{CanFrame, Layout, Signal};
pub use integrity::{Integrity, IntegrityEvent, IntegritySnapshot, IntegrityStats};
pub use models::*;
pub use monitor::{
    ArrivalTable, SequenceGap, SequenceState, SequenceTracker, StaleSignal, StalenessConfig,
    StalenessMonitor, WatchConfig,
};
pub use store::StateStore;
