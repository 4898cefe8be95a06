//! HTTP request handlers
//!
//! All handlers are read-only views of the state store.

pub mod health;
pub mod metrics;
pub mod vehicle;

use axum::http::Uri;

use crate::error::ApiError;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route");
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
