//! Frame dispatcher
//!
//! Routes each frame to the decoder for its identifier and writes the
//! result into the state store. Every frame is isolated: a decode failure is
//! logged and the frame dropped, and nothing is unwound past the frame.

use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, error, trace};

use crate::decode::{decode_fault_status, decode_metric, decode_vehicle_state};
use crate::error::{DecodeError, DecodeResult};
use crate::frame::{CanFrame, Layout, Signal};
use crate::integrity::{Integrity, IntegrityEvent};
use crate::monitor::{ArrivalTable, SequenceTracker};
use crate::store::StateStore;

/// Result of dispatching one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame decoded and applied to the store
    Decoded(Signal),
    /// Identifier not in the signal table, only its arrival was recorded
    Unrecognized,
    /// Recognized identifier with a payload that could not be decoded
    Failed(DecodeError),
}

/// Owns the decode path: store writes, arrival times and gap detection
pub struct Dispatcher {
    store: Arc<StateStore>,
    arrivals: Arc<ArrivalTable>,
    integrity: Arc<Integrity>,
    sequence: SequenceTracker,
}

impl Dispatcher {
    pub fn new(
        store: Arc<StateStore>,
        arrivals: Arc<ArrivalTable>,
        integrity: Arc<Integrity>,
    ) -> Self {
        Self {
            store,
            arrivals,
            integrity,
            sequence: SequenceTracker::new(),
        }
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }

    /// Dispatch a frame received now
    pub fn dispatch(&mut self, frame: &CanFrame) -> FrameOutcome {
        self.dispatch_at(frame, Instant::now())
    }

    /// Dispatch a frame received at `at`
    pub fn dispatch_at(&mut self, frame: &CanFrame, at: Instant) -> FrameOutcome {
        self.arrivals.record(frame.id, at);
        self.integrity.stats().record_received();

        let Some(signal) = Signal::from_id(frame.id) else {
            trace!(can_id = format!("0x{:03X}", frame.id), "Ignoring unknown frame");
            self.integrity.stats().record_unknown();
            return FrameOutcome::Unrecognized;
        };

        match self.apply(signal, &frame.data) {
            Ok(()) => {
                self.integrity.stats().record_decoded();
                FrameOutcome::Decoded(signal)
            }
            Err(e) => {
                error!(
                    can_id = format!("0x{:03X}", frame.id),
                    data = ?frame.data,
                    error = %e,
                    "Error processing CAN message"
                );
                self.integrity.stats().record_decode_failure();
                FrameOutcome::Failed(e)
            }
        }
    }

    fn apply(&mut self, signal: Signal, data: &[u8]) -> DecodeResult<()> {
        match signal.layout() {
            Layout::VehicleState => {
                let state = decode_vehicle_state(data)?;
                let counter = state.message_counter;
                debug!(
                    primary = ?state.primary_state,
                    sub = ?state.sub_state,
                    counter,
                    "Vehicle state"
                );
                self.store.update(|d| d.vehicle_state = state);

                // A gap never blocks the state update above
                if let Some(gap) = self.sequence.observe(counter) {
                    self.integrity.report(IntegrityEvent::SequenceGap(gap));
                }
            }
            Layout::FaultStatus => {
                let fault = decode_fault_status(data)?;
                self.store.update(|d| d.fault_status = fault);
            }
            Layout::Scalar | Layout::Array(_) => {
                let update = decode_metric(signal, data)?;
                self.store.update(|d| update.apply(d));
            }
        }
        Ok(())
    }
}
