//! Periodic staleness scanning
//!
//! Compares the time since the last frame of each watched signal against
//! that signal's threshold. Signals that were never seen are skipped, so
//! only signals that went silent after arriving are reported. Detection is
//! level-triggered: a silent signal is reported again on every scan.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::ArrivalTable;
use crate::error::ConfigError;
use crate::frame::Signal;
use crate::integrity::{Integrity, IntegrityEvent};

/// A watched signal that exceeded its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleSignal {
    pub signal: Signal,
    pub elapsed: Duration,
    pub threshold: Duration,
}

/// Staleness monitor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StalenessConfig {
    /// Scan period in milliseconds
    #[serde(default = "default_scan_period")]
    pub scan_period_ms: u64,
    /// Watched signals and their thresholds
    #[serde(default = "default_watches")]
    pub watch: Vec<WatchConfig>,
}

/// One watched signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    pub signal: Signal,
    /// Maximum silence before the signal is reported stale
    pub timeout_ms: u64,
}

impl WatchConfig {
    pub fn new(signal: Signal, timeout_ms: u64) -> Self {
        Self { signal, timeout_ms }
    }
}

impl StalenessConfig {
    /// Check the settings can drive a scan loop
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_period_ms == 0 {
            return Err(ConfigError::ZeroScanPeriod);
        }
        Ok(())
    }
}

impl Default for StalenessConfig {
    fn default() -> Self {
        Self {
            scan_period_ms: default_scan_period(),
            watch: default_watches(),
        }
    }
}

fn default_scan_period() -> u64 {
    100
}

/// Time-critical signals get 200ms, slower thermal signals 400ms
fn default_watches() -> Vec<WatchConfig> {
    vec![
        WatchConfig::new(Signal::VehicleState, 200),
        WatchConfig::new(Signal::FaultStatus, 200),
        WatchConfig::new(Signal::PowerOutput, 200),
        WatchConfig::new(Signal::MotorTemp, 400),
        WatchConfig::new(Signal::BatteryTemp, 400),
    ]
}

/// Scans the arrival table for silent signals
pub struct StalenessMonitor {
    watches: Vec<(Signal, Duration)>,
    scan_period: Duration,
    arrivals: Arc<ArrivalTable>,
    integrity: Arc<Integrity>,
}

impl StalenessMonitor {
    /// Build a monitor, rejecting a config that [`StalenessConfig::validate`] refuses
    pub fn new(
        config: &StalenessConfig,
        arrivals: Arc<ArrivalTable>,
        integrity: Arc<Integrity>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let watches = config
            .watch
            .iter()
            .map(|w| (w.signal, Duration::from_millis(w.timeout_ms)))
            .collect();

        Ok(Self {
            watches,
            scan_period: Duration::from_millis(config.scan_period_ms),
            arrivals,
            integrity,
        })
    }

    pub fn scan_period(&self) -> Duration {
        self.scan_period
    }

    /// Watched signals silent for longer than their threshold at `now`
    pub fn scan(&self, now: Instant) -> Vec<StaleSignal> {
        self.watches
            .iter()
            .filter_map(|&(signal, threshold)| {
                let last = self.arrivals.last_seen(signal.id())?;
                let elapsed = now.saturating_duration_since(last);
                (elapsed > threshold).then_some(StaleSignal {
                    signal,
                    elapsed,
                    threshold,
                })
            })
            .collect()
    }

    /// Scan and report every stale signal, returning how many were found
    pub fn check(&self, now: Instant) -> usize {
        let stale = self.scan(now);
        let count = stale.len();
        for entry in stale {
            self.integrity.report(IntegrityEvent::Stale(entry));
        }
        count
    }

    /// Scan every period until `running` is cleared
    ///
    /// The flag is checked on each wake, so a stop takes effect at the next
    /// tick rather than interrupting a scan.
    pub async fn run(&self, running: Arc<AtomicBool>) {
        let mut ticker = tokio::time::interval(self.scan_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            period_ms = self.scan_period.as_millis() as u64,
            watched = self.watches.len(),
            "Staleness monitor started"
        );

        loop {
            ticker.tick().await;
            if !running.load(Ordering::SeqCst) {
                break;
            }
            let stale = self.check(Instant::now());
            if stale > 0 {
                debug!(stale, "Staleness scan found silent signals");
            }
        }

        info!("Staleness monitor stopped");
    }
}
