//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound(String),
}

/// Standard error response format
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
