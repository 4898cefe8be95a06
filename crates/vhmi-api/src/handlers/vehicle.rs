//! Vehicle snapshot, state and fault handlers

use axum::extract::State;
use axum::Json;
use vhmi_core::{FaultStatus, VehicleData, VehicleState};

use crate::state::AppState;

/// GET /vehicle_data
/// Full snapshot of every decoded signal
pub async fn vehicle_data(State(state): State<AppState>) -> Json<VehicleData> {
    Json(state.store.snapshot())
}

/// GET /vehicle_state
pub async fn vehicle_state(State(state): State<AppState>) -> Json<VehicleState> {
    Json(state.store.vehicle_state())
}

/// GET /fault_status
pub async fn fault_status(State(state): State<AppState>) -> Json<FaultStatus> {
    Json(state.store.fault_status())
}
