//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Parse Error ==
/// An upstream body did not match the expected schema.
#[derive(Error, Debug)]
#[error("Unexpected upstream shape for {context}: {source}")]
pub struct ParseError {
    pub context: &'static str,
    #[source]
    pub source: serde_json::Error,
}

// == Upstream Error ==
/// Failure talking to the sports data provider.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// No API key configured
    #[error("Sports API key is not configured")]
    MissingApiKey,

    /// Provider answered with a non-2xx status
    #[error("Upstream returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    /// Connection, TLS or timeout failure
    #[error("Upstream request to {path} failed: {message}")]
    Transport { path: String, message: String },

    /// Provider reported errors inside a 2xx body
    #[error("Upstream reported errors for {path}: {detail}")]
    Api { path: String, detail: String },

    /// Body was not the expected envelope
    #[error(transparent)]
    Parse(#[from] ParseError),
}

// == Proxy Error ==
/// Error taxonomy surfaced by the fetch-cache operations.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Missing credentials, fatal for the request
    #[error("{0}")]
    Configuration(String),

    /// Upstream unavailable or malformed, never retried
    #[error("Upstream unavailable: {0}")]
    Upstream(#[source] UpstreamError),

    /// Upstream has no such resource
    #[error("{0}")]
    NotFound(String),

    /// Malformed query parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::MissingApiKey => {
                ProxyError::Configuration(UpstreamError::MissingApiKey.to_string())
            }
            other => ProxyError::Upstream(other),
        }
    }
}

// == Response Fallback ==
/// Body served on 502 so callers see the success payload's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// `[]`
    EmptyList,
    /// `null`
    Null,
}

impl Fallback {
    fn body(self) -> Value {
        match self {
            Fallback::EmptyList => json!([]),
            Fallback::Null => Value::Null,
        }
    }
}

// == API Error ==
/// A proxy error paired with the shape its route promises on upstream failure.
#[derive(Debug)]
pub struct ApiError {
    pub error: ProxyError,
    pub fallback: Fallback,
}

impl ApiError {
    pub fn new(error: ProxyError, fallback: Fallback) -> Self {
        Self { error, fallback }
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            ProxyError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self.error {
            ProxyError::Upstream(_) => (status, Json(self.fallback.body())).into_response(),
            other => (status, Json(ErrorResponse::new(other.to_string()))).into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy operations.
pub type Result<T> = std::result::Result<T, ProxyError>;
