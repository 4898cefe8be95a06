//! Bus and service configuration
//!
//! This module contains configuration types for the bus source and for the
//! receive loop that drains it.

use serde::{Deserialize, Serialize};

// =============================================================================
// Bus Configuration
// =============================================================================

/// Bus source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BusConfig {
    /// Raw SocketCAN (Linux only)
    SocketCan(SocketCanConfig),
    /// In-process bus for testing and demos
    Mock(MockConfig),
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::Mock(MockConfig::default())
    }
}

impl BusConfig {
    /// Name of the channel the bus binds to
    pub fn channel(&self) -> &str {
        match self {
            BusConfig::SocketCan(cfg) => &cfg.interface,
            BusConfig::Mock(cfg) => &cfg.channel,
        }
    }
}

/// SocketCAN configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocketCanConfig {
    /// CAN interface name (e.g., "can0")
    #[serde(default = "default_interface")]
    pub interface: String,
}

impl Default for SocketCanConfig {
    fn default() -> Self {
        Self {
            interface: default_interface(),
        }
    }
}

fn default_interface() -> String {
    "can0".to_string()
}

/// Mock bus configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
    /// Channel name reported by the bus
    #[serde(default = "default_mock_channel")]
    pub channel: String,
    /// Refuse to open, simulating a missing interface
    #[serde(default)]
    pub fail_open: bool,
    /// Frames queued as soon as the bus opens
    #[serde(default)]
    pub frames: Vec<MockFrameConfig>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            channel: default_mock_channel(),
            fail_open: false,
            frames: Vec::new(),
        }
    }
}

fn default_mock_channel() -> String {
    "mock0".to_string()
}

/// A frame preloaded into the mock bus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockFrameConfig {
    pub id: u32,
    #[serde(default)]
    pub data: Vec<u8>,
}

// =============================================================================
// Service Configuration
// =============================================================================

/// Receive loop timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// How long one receive call waits for a frame
    #[serde(default = "default_recv_timeout")]
    pub recv_timeout_ms: u64,
    /// Pause after each iteration so other tasks get scheduled
    #[serde(default = "default_yield_interval")]
    pub yield_interval_ms: u64,
    /// Pause after a bus receive error before trying again
    #[serde(default = "default_error_backoff")]
    pub error_backoff_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            recv_timeout_ms: default_recv_timeout(),
            yield_interval_ms: default_yield_interval(),
            error_backoff_ms: default_error_backoff(),
        }
    }
}

fn default_recv_timeout() -> u64 {
    100
}

fn default_yield_interval() -> u64 {
    1
}

fn default_error_backoff() -> u64 {
    1000
}
