//! Service layer error types

use beacon_core::DomainError;
use beacon_storage::StorageError;

/// Failures of a presence or file cleanup operation
///
/// Per-object deletion failures are not errors; they are counted in the
/// deletion summary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Domain rule violation or presence store failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The service context was wired with missing or inconsistent parts
    #[error("Invalid service configuration: {0}")]
    Config(String),

    /// The object store client could not be built for this request
    #[error("Object store unavailable: {0}")]
    ObjectStoreUnavailable(#[source] StorageError),
}

impl ServiceError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) if e.is_not_found() => 404,
            Self::Domain(e) if e.is_validation() => 400,
            Self::Domain(_) | Self::Config(_) | Self::ObjectStoreUnavailable(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
            Self::ObjectStoreUnavailable(_) => "OBJECT_STORE_UNAVAILABLE",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
