//! Signal-integrity reporting
//!
//! Sequence gaps and stale signals are soft failures: they are logged as
//! warnings, counted, and published to any subscribers. They never stop
//! frame processing and never change decoded values.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

use crate::monitor::{SequenceGap, StaleSignal};

const EVENT_CAPACITY: usize = 256;

/// A detected integrity failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityEvent {
    SequenceGap(SequenceGap),
    Stale(StaleSignal),
}

/// Frame and failure counters
#[derive(Debug, Default)]
pub struct IntegrityStats {
    frames_received: AtomicU64,
    frames_decoded: AtomicU64,
    unknown_frames: AtomicU64,
    decode_failures: AtomicU64,
    sequence_gaps: AtomicU64,
    stale_reports: AtomicU64,
}

/// Point-in-time copy of [`IntegrityStats`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegritySnapshot {
    pub frames_received: u64,
    pub frames_decoded: u64,
    pub unknown_frames: u64,
    pub decode_failures: u64,
    pub sequence_gaps: u64,
    pub stale_reports: u64,
}

impl IntegrityStats {
    pub(crate) fn record_received(&self) {
        self.frames_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_decoded(&self) {
        self.frames_decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unknown(&self) {
        self.unknown_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> IntegritySnapshot {
        IntegritySnapshot {
            frames_received: self.frames_received.load(Ordering::Relaxed),
            frames_decoded: self.frames_decoded.load(Ordering::Relaxed),
            unknown_frames: self.unknown_frames.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            sequence_gaps: self.sequence_gaps.load(Ordering::Relaxed),
            stale_reports: self.stale_reports.load(Ordering::Relaxed),
        }
    }
}

/// Sink for integrity events, shared by the dispatcher and the monitor
#[derive(Debug)]
pub struct Integrity {
    events: broadcast::Sender<IntegrityEvent>,
    stats: IntegrityStats,
}

impl Default for Integrity {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrity {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            events,
            stats: IntegrityStats::default(),
        }
    }

    /// Receive every event reported after this call
    pub fn subscribe(&self) -> broadcast::Receiver<IntegrityEvent> {
        self.events.subscribe()
    }

    pub fn stats(&self) -> &IntegrityStats {
        &self.stats
    }

    /// Log and count an event, then publish it
    pub fn report(&self, event: IntegrityEvent) {
        match &event {
            IntegrityEvent::SequenceGap(gap) => {
                self.stats.sequence_gaps.fetch_add(1, Ordering::Relaxed);
                warn!(
                    expected = gap.expected,
                    actual = gap.actual,
                    "Missed state message(s)"
                );
            }
            IntegrityEvent::Stale(stale) => {
                self.stats.stale_reports.fetch_add(1, Ordering::Relaxed);
                warn!(
                    signal = stale.signal.name(),
                    can_id = format!("0x{:03X}", stale.signal.id()),
                    elapsed_ms = stale.elapsed.as_millis() as u64,
                    threshold_ms = stale.threshold.as_millis() as u64,
                    "Signal stale"
                );
            }
        }

        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Signal;
    use std::time::Duration;

    #[test]
    fn test_report_counts_and_publishes() {
        let integrity = Integrity::new();
        let mut rx = integrity.subscribe();

        let gap = SequenceGap {
            expected: 3,
            actual: 5,
        };
        integrity.report(IntegrityEvent::SequenceGap(gap));
        integrity.report(IntegrityEvent::Stale(StaleSignal {
            signal: Signal::MotorTemp,
            elapsed: Duration::from_millis(450),
            threshold: Duration::from_millis(400),
        }));

        assert_eq!(rx.try_recv().unwrap(), IntegrityEvent::SequenceGap(gap));
        assert!(matches!(rx.try_recv().unwrap(), IntegrityEvent::Stale(_)));

        let snapshot = integrity.stats().snapshot();
        assert_eq!(snapshot.sequence_gaps, 1);
        assert_eq!(snapshot.stale_reports, 1);
        assert_eq!(snapshot.frames_received, 0);
    }

    #[test]
    fn test_report_without_subscribers() {
        let integrity = Integrity::new();
        integrity.report(IntegrityEvent::SequenceGap(SequenceGap {
            expected: 1,
            actual: 9,
        }));
        assert_eq!(integrity.stats().snapshot().sequence_gaps, 1);
    }
}
