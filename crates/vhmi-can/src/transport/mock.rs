//! Mock bus for testing and demos

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use vhmi_core::CanFrame;

use super::{BusError, BusSource};
use crate::config::MockConfig;

/// In-process bus fed by `inject`
pub struct MockBus {
    channel: String,
    open: AtomicBool,
    tx: mpsc::UnboundedSender<Result<CanFrame, BusError>>,
    rx: Mutex<mpsc::UnboundedReceiver<Result<CanFrame, BusError>>>,
}

impl MockBus {
    /// Create an open bus with no queued frames
    pub fn new(channel: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            channel: channel.into(),
            open: AtomicBool::new(true),
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Open a bus from config, queueing its preloaded frames
    pub fn open(config: &MockConfig) -> Result<Self, BusError> {
        if config.fail_open {
            return Err(BusError::ConnectionFailed(format!(
                "Failed to open mock bus on {}",
                config.channel
            )));
        }

        let bus = Self::new(config.channel.clone());
        for entry in &config.frames {
            let frame = CanFrame::new(entry.id, &entry.data).map_err(|e| {
                BusError::InvalidConfig(format!("Frame 0x{:03X}: {}", entry.id, e))
            })?;
            bus.inject(frame);
        }

        tracing::debug!(
            channel = %bus.channel,
            queued = config.frames.len(),
            "Mock bus opened"
        );
        Ok(bus)
    }

    /// Queue a frame for the next `recv`
    pub fn inject(&self, frame: CanFrame) {
        let _ = self.tx.send(Ok(frame));
    }

    /// Queue a receive error for the next `recv`
    pub fn inject_error(&self, error: BusError) {
        let _ = self.tx.send(Err(error));
    }
}

#[async_trait]
impl BusSource for MockBus {
    async fn recv(&self, timeout: Duration) -> Result<Option<CanFrame>, BusError> {
        if !self.open.load(Ordering::SeqCst) {
            return Err(BusError::ConnectionClosed);
        }

        let mut rx = self.rx.lock().await;
        match tokio::time::timeout(timeout, rx.recv()).await {
            Ok(Some(Ok(frame))) => Ok(Some(frame)),
            Ok(Some(Err(e))) => Err(e),
            // Sender lives on self, so the channel only closes on drop
            Ok(None) => Err(BusError::ConnectionClosed),
            Err(_) => Ok(None),
        }
    }

    async fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn channel(&self) -> &str {
        &self.channel
    }
}
