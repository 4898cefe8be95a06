//! Raw SocketCAN bus reader

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use socketcan::{CanFrame as RawFrame, CanSocket, EmbeddedFrame, Frame, Socket};
use vhmi_core::CanFrame;

use crate::config::SocketCanConfig;
use crate::transport::{BusError, BusSource};

/// Poll interval of the non-blocking socket while waiting for a frame
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Raw CAN socket bound to one interface
pub struct SocketCanBus {
    interface: String,
    socket: Arc<Mutex<Option<CanSocket>>>,
}

impl SocketCanBus {
    pub async fn new(config: &SocketCanConfig) -> Result<Self, BusError> {
        let socket = CanSocket::open(&config.interface).map_err(|e| {
            BusError::ConnectionFailed(format!(
                "Failed to open CAN socket on {}: {}",
                config.interface, e
            ))
        })?;

        // Non-blocking so a receive can give up at its deadline
        socket.set_nonblocking(true).map_err(|e| {
            BusError::InvalidConfig(format!("Failed to set non-blocking: {}", e))
        })?;

        tracing::info!(interface = %config.interface, "SocketCAN bus opened");

        Ok(Self {
            interface: config.interface.clone(),
            socket: Arc::new(Mutex::new(Some(socket))),
        })
    }
}

/// Convert a data frame; remote and error frames carry no signal payload
fn convert(frame: RawFrame) -> Option<CanFrame> {
    match frame {
        RawFrame::Data(data) => {
            let id = data.raw_id();
            match CanFrame::new(id, data.data()) {
                Ok(frame) => Some(frame),
                Err(e) => {
                    tracing::debug!(can_id = format!("0x{:03X}", id), error = %e, "Dropping frame");
                    None
                }
            }
        }
        RawFrame::Remote(_) | RawFrame::Error(_) => None,
    }
}

#[async_trait]
impl BusSource for SocketCanBus {
    async fn recv(&self, timeout: Duration) -> Result<Option<CanFrame>, BusError> {
        let socket = self.socket.clone();

        tokio::task::spawn_blocking(move || {
            let deadline = Instant::now() + timeout;
            loop {
                {
                    let guard = socket.lock();
                    let Some(sock) = guard.as_ref() else {
                        return Err(BusError::ConnectionClosed);
                    };
                    match sock.read_frame() {
                        Ok(raw) => {
                            if let Some(frame) = convert(raw) {
                                return Ok(Some(frame));
                            }
                        }
                        Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                        Err(e) => return Err(BusError::ReceiveFailed(e.to_string())),
                    }
                }

                if Instant::now() >= deadline {
                    return Ok(None);
                }
                std::thread::sleep(POLL_INTERVAL);
            }
        })
        .await
        .map_err(|e| BusError::ReceiveFailed(format!("Receive task failed: {}", e)))?
    }

    async fn close(&self) {
        if self.socket.lock().take().is_some() {
            tracing::info!(interface = %self.interface, "SocketCAN bus closed");
        }
    }

    fn is_open(&self) -> bool {
        self.socket.lock().is_some()
    }

    fn channel(&self) -> &str {
        &self.interface
    }
}
