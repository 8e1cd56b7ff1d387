//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stream_query::ScanError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// No event satisfied the query; benign.
    NotFound(String),
    /// A scan failed before reaching a result.
    Scan(ScanError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Scan(err) => scan_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}

fn scan_error_to_response(err: ScanError) -> (StatusCode, String) {
    tracing::error!(error = %err, "scan failed");
    match &err {
        ScanError::Connection(_) | ScanError::TopicNotFound(_) => {
            (StatusCode::BAD_GATEWAY, err.to_string())
        }
        ScanError::MalformedRecord { .. } => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        ApiError::Scan(err)
    }
}
