//! Structured errors for the searchgate server.
//!
//! Every error is rendered as `{"error": <message>}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use searchgate_core::Error;

/// Errors returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed query parameters.
    #[error("{0}")]
    InvalidInput(String),

    /// Failover could not produce a result.
    #[error("{0}")]
    Upstream(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidInput(msg) => ApiError::InvalidInput(format!("INVALID_INPUT: {msg}")),
            other => ApiError::Upstream(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "search request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
