//! Application error types
//!
//! `AppError` covers wiring and startup failures of the server process.
//! `ErrorResponse` is the body every JSON API error is rendered into.

use serde::Serialize;

/// Startup and wiring failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The presence store could not be configured
    #[error("Presence store error: {0}")]
    PresenceStore(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Binding or serving the HTTP listener failed
    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}

impl AppError {
    /// Stable machine-readable code
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PresenceStore(_) => "PRESENCE_STORE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Server(_) => "SERVER_ERROR",
        }
    }
}

/// Error body rendered as `{"code", "message", "details"?}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self::new(err.error_code(), err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
