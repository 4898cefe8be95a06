//! vhmi-can - Bus access for the vehicle HMI service
//!
//! This crate provides:
//! - The [`BusSource`] trait and its SocketCAN and mock implementations
//! - Bus and receive loop configuration
//! - [`CanService`], which drains the bus into a
//!   [`Dispatcher`](vhmi_core::Dispatcher) and runs the staleness monitor

pub mod config;
pub mod service;
pub mod transport;

pub use config::{BusConfig, MockConfig, MockFrameConfig, ServiceConfig, SocketCanConfig};
pub use service::{CanService, ServiceHandle};
pub use transport::{create_bus, mock::MockBus, BusError, BusSource};

#[cfg(all(target_os = "linux", feature = "socketcan"))]
pub use transport::socketcan::SocketCanBus;
