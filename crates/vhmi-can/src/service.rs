//! Bus receive service
//!
//! Drains the bus on a dedicated task, feeding every frame through the
//! dispatcher, and runs the staleness monitor next to it. Both tasks share
//! one running flag and are stopped together through [`ServiceHandle`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use vhmi_core::{Dispatcher, StalenessMonitor};

use crate::config::ServiceConfig;
use crate::transport::BusSource;

/// Receive loop plus staleness monitor, ready to be spawned
pub struct CanService {
    bus: Arc<dyn BusSource>,
    dispatcher: Dispatcher,
    monitor: Arc<StalenessMonitor>,
    config: ServiceConfig,
}

impl CanService {
    pub fn new(
        bus: Arc<dyn BusSource>,
        dispatcher: Dispatcher,
        monitor: StalenessMonitor,
        config: ServiceConfig,
    ) -> Self {
        Self {
            bus,
            dispatcher,
            monitor: Arc::new(monitor),
            config,
        }
    }

    /// Start the receive loop and the staleness monitor
    pub fn spawn(self) -> ServiceHandle {
        let running = Arc::new(AtomicBool::new(true));

        info!(channel = %self.bus.channel(), "CAN service started");

        let monitor = tokio::spawn({
            let monitor = self.monitor.clone();
            let running = running.clone();
            async move { monitor.run(running).await }
        });

        let receive = tokio::spawn(receive_loop(
            self.bus.clone(),
            self.dispatcher,
            self.config,
            running.clone(),
        ));

        ServiceHandle {
            running,
            bus: self.bus,
            receive: Some(receive),
            monitor: Some(monitor),
        }
    }
}

async fn receive_loop(
    bus: Arc<dyn BusSource>,
    mut dispatcher: Dispatcher,
    config: ServiceConfig,
    running: Arc<AtomicBool>,
) {
    let recv_timeout = Duration::from_millis(config.recv_timeout_ms);
    let yield_interval = Duration::from_millis(config.yield_interval_ms);
    let backoff = Duration::from_millis(config.error_backoff_ms);

    while running.load(Ordering::SeqCst) {
        match bus.recv(recv_timeout).await {
            Ok(Some(frame)) => {
                dispatcher.dispatch(&frame);
            }
            Ok(None) => {}
            Err(e) => {
                error!(error = %e, "Error in CAN service loop");
                tokio::time::sleep(backoff).await;
                continue;
            }
        }

        if yield_interval.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(yield_interval).await;
        }
    }

    bus.close().await;
    info!("CAN service stopped");
}

/// Handle to a running [`CanService`]
///
/// Dropping the handle clears the running flag; tasks wind down at their
/// next iteration.
pub struct ServiceHandle {
    running: Arc<AtomicBool>,
    bus: Arc<dyn BusSource>,
    receive: Option<JoinHandle<()>>,
    monitor: Option<JoinHandle<()>>,
}

impl ServiceHandle {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Ask both tasks to stop without waiting for them
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Stop both tasks and wait for them to exit
    ///
    /// The receive loop closes the bus on its way out. The wait is bounded
    /// by one receive timeout or one error backoff, whichever is in flight.
    pub async fn shutdown(mut self) {
        self.stop();

        for (name, handle) in [
            ("receive", self.receive.take()),
            ("monitor", self.monitor.take()),
        ] {
            if let Some(handle) = handle {
                if let Err(e) = handle.await {
                    error!(task = name, error = %e, "Service task failed");
                }
            }
        }

        debug!(bus_open = self.bus.is_open(), "CAN service shut down");
    }
}

impl Drop for ServiceHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
