//! Business logic services
//!
//! This module contains the service layer implementations that handle
//! validation and orchestration of presence and file cleanup operations.

pub mod context;
pub mod error;
pub mod file_cleanup;
pub mod presence;

// Re-export all services for convenience
pub use context::{DeletionSettings, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use file_cleanup::FileCleanupService;
pub use presence::PresenceService;
