//! Bus source trait

use std::time::Duration;

use async_trait::async_trait;
use vhmi_core::CanFrame;

use super::BusError;

/// Source of broadcast frames
///
/// Abstracts the underlying bus (SocketCAN, mock) behind a blocking-with-
/// timeout receive.
#[async_trait]
pub trait BusSource: Send + Sync {
    /// Wait for the next frame
    ///
    /// # Returns
    /// `Ok(Some(frame))` when a frame arrived, `Ok(None)` when `timeout`
    /// elapsed first, or an error if the bus failed
    async fn recv(&self, timeout: Duration) -> Result<Option<CanFrame>, BusError>;

    /// Release the underlying bus resource
    async fn close(&self);

    /// Check if the bus is still open
    fn is_open(&self) -> bool;

    /// Name of the channel this bus is bound to
    fn channel(&self) -> &str;
}
