//! Bus errors

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Receive failed: {0}")]
    ReceiveFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Bus not supported: {0}")]
    Unsupported(String),
}
