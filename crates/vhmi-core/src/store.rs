//! Live state store shared between the decode path and the query surface

use parking_lot::RwLock;

use crate::models::{
    FaultStatus, HealthReport, PerformanceMetrics, PowertrainMetrics, TireMetrics, VehicleData,
    VehicleState,
};

/// Single in-memory aggregate of the latest decoded values
///
/// Only the dispatcher writes to the store, and it applies each frame under
/// one write lock. Readers therefore always see whole frames. All public
/// accessors are read-only and return owned copies.
#[derive(Debug, Default)]
pub struct StateStore {
    data: RwLock<VehicleData>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a mutation under a single write lock
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut VehicleData) -> R) -> R {
        f(&mut self.data.write())
    }

    /// Full snapshot of every tracked signal
    pub fn snapshot(&self) -> VehicleData {
        self.data.read().clone()
    }

    pub fn vehicle_state(&self) -> VehicleState {
        self.data.read().vehicle_state.clone()
    }

    pub fn fault_status(&self) -> FaultStatus {
        self.data.read().fault_status.clone()
    }

    pub fn powertrain(&self) -> PowertrainMetrics {
        self.data.read().powertrain()
    }

    pub fn tires(&self) -> TireMetrics {
        self.data.read().tires()
    }

    pub fn performance(&self) -> PerformanceMetrics {
        self.data.read().performance()
    }

    pub fn health(&self) -> HealthReport {
        self.data.read().health()
    }
}
