//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{IdentifierError, UserName, WorkspaceId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Presence not found for {user_name} in workspace {workspace_id}")]
    PresenceNotFound {
        workspace_id: WorkspaceId,
        user_name: UserName,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("{name} must be between 1ms and {max_ms}ms")]
    InvalidDuration { name: &'static str, max_ms: u64 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Presence store error: {0}")]
    StoreError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PresenceNotFound { .. } => "UNKNOWN_PRESENCE",

            // Validation
            Self::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::InvalidDuration { .. } => "INVALID_DURATION",

            // Infrastructure
            Self::StoreError(_) => "STORE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PresenceNotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier(_)
                | Self::InvalidStatus(_)
                | Self::InvalidDuration { .. }
        )
    }
}
