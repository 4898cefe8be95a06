//! vhmi-api - Read-only HTTP query surface for the vehicle HMI
//!
//! Every handler copies what it needs out of the [`StateStore`](vhmi_core::StateStore)
//! and serializes it; no handler writes vehicle state.
//!
//! # Usage
//!
//! ```ignore
//! use vhmi_api::{create_router, AppState};
//!
//! let state = AppState::new(store, integrity);
//! let router = create_router(state);
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the query router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .route("/diagnostics", get(handlers::health::diagnostics))
        // Vehicle state routes
        .route("/vehicle_data", get(handlers::vehicle::vehicle_data))
        .route("/vehicle_state", get(handlers::vehicle::vehicle_state))
        .route("/fault_status", get(handlers::vehicle::fault_status))
        // Metric group routes
        .route("/metrics/powertrain", get(handlers::metrics::powertrain))
        .route("/metrics/tires", get(handlers::metrics::tires))
        .route("/metrics/performance", get(handlers::metrics::performance))
        .fallback(handlers::not_found)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
