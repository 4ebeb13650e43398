//! Error types for release-daemon

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use release_registry::RegistryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request (undecodable body, bad query string)
    #[error("{0}")]
    BadRequest(String),

    /// Rejected by the registry
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ApiError {
    /// Every API error is the caller's fault
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Registry(RegistryError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Status name, e.g. `BAD_REQUEST`
    pub http_status: String,
    pub message: String,
    /// Server local time
    pub time: chrono::NaiveDateTime,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            http_status: status_name(status),
            message: message.into(),
            time: chrono::Local::now().naive_local(),
        }
    }
}

/// `StatusCode::BAD_REQUEST` → `"BAD_REQUEST"`
fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace(' ', "_")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(error = %self, status = %status, "Request rejected");

        (status, Json(ErrorResponse::new(status, self.to_string()))).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;
