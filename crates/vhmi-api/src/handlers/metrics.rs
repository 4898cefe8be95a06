//! Metric group handlers

use axum::extract::State;
use axum::Json;
use vhmi_core::{PerformanceMetrics, PowertrainMetrics, TireMetrics};

use crate::state::AppState;

/// GET /metrics/powertrain
pub async fn powertrain(State(state): State<AppState>) -> Json<PowertrainMetrics> {
    Json(state.store.powertrain())
}

/// GET /metrics/tires
pub async fn tires(State(state): State<AppState>) -> Json<TireMetrics> {
    Json(state.store.tires())
}

/// GET /metrics/performance
pub async fn performance(State(state): State<AppState>) -> Json<PerformanceMetrics> {
    Json(state.store.performance())
}
