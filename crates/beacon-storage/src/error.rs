//! Object store client errors

/// Errors raised while building an object store client.
///
/// Failures of individual deletions are not errors of this type; they are
/// reported per object as `beacon_core::DeletionFailure`.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid object store configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type for object store setup
pub type StorageResult<T> = Result<T, StorageError>;
