//! Bus sources
//!
//! - SocketCAN adapter for raw CAN frames (Linux only)
//! - Mock bus for testing and demos
//!
//! # Example
//!
//! ```ignore
//! use vhmi_can::config::BusConfig;
//! use vhmi_can::transport::create_bus;
//!
//! let bus = create_bus(&BusConfig::default()).await?;
//! let frame = bus.recv(Duration::from_millis(100)).await?;
//! ```

mod adapter;
pub mod error;
pub mod mock;

#[cfg(all(target_os = "linux", feature = "socketcan"))]
pub mod socketcan;

pub use adapter::BusSource;
pub use error::BusError;

use std::sync::Arc;

use crate::config::BusConfig;

/// Open the bus described by `config`
///
/// Failure here is fatal to service startup.
pub async fn create_bus(config: &BusConfig) -> Result<Arc<dyn BusSource>, BusError> {
    match config {
        #[cfg(all(target_os = "linux", feature = "socketcan"))]
        BusConfig::SocketCan(cfg) => {
            let bus = socketcan::SocketCanBus::new(cfg).await?;
            Ok(Arc::new(bus))
        }
        #[cfg(not(all(target_os = "linux", feature = "socketcan")))]
        BusConfig::SocketCan(_) => Err(BusError::Unsupported(
            "SocketCAN requires Linux and the 'socketcan' feature".to_string(),
        )),
        BusConfig::Mock(cfg) => {
            let bus = mock::MockBus::open(cfg)?;
            Ok(Arc::new(bus))
        }
    }
}
