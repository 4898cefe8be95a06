//! Error types for frame handling and decoding

use thiserror::Error;

use crate::frame::Signal;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while turning a recognized frame into typed fields
///
/// A decode error is always local to one frame: the dispatcher logs it,
/// drops the frame and carries on with the next one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload is shorter than the layout of the signal requires
    #[error("payload too short for {signal}: expected {expected} bytes, got {actual}")]
    PayloadTooShort {
        signal: Signal,
        expected: usize,
        actual: usize,
    },

    /// Signal is routed to a decoder that does not handle it
    #[error("no metric layout for {0}")]
    NotAMetric(Signal),
}

/// Errors raised when building a frame
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Classic CAN carries at most 8 data bytes
    #[error("payload too long: {0} bytes (max 8)")]
    PayloadTooLong(usize),
}

/// Errors raised when validating monitor configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The scan loop needs a non-zero tick
    #[error("staleness scan_period_ms must be greater than zero")]
    ZeroScanPeriod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_payload_message_names_signal() {
        let err = DecodeError::PayloadTooShort {
            signal: Signal::VehicleState,
            expected: 6,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "payload too short for vehicle_state (0x600): expected 6 bytes, got 2"
        );
    }
}
