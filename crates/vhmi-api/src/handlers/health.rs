//! Service status handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vhmi_core::{HealthReport, IntegritySnapshot};

use crate::state::AppState;

/// Version reported by the root endpoint
pub const API_VERSION: &str = "2.0";

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub api_status: &'static str,
    #[serde(flatten)]
    pub report: HealthReport,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Vehicle HMI API",
        version: API_VERSION,
        status: "running",
    })
}

/// GET /health
///
/// `receiving_messages` is true once any state frame with a non-zero
/// counter has been applied.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        api_status: "healthy",
        report: state.store.health(),
    })
}

/// GET /diagnostics
/// Frame and integrity counters since startup
pub async fn diagnostics(State(state): State<AppState>) -> Json<IntegritySnapshot> {
    Json(state.integrity.stats().snapshot())
}
