//! # beacon-core
//!
//! Domain layer containing presence entities, liveness rules, deletion outcomes,
//! and the store traits implemented by the infrastructure crates.
//! This crate has zero dependencies on infrastructure (Redis, HTTP, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    DeletionAttempt, DeletionFailure, DeletionSummary, PresenceRecord, PresenceStatus,
};
pub use error::DomainError;
pub use traits::{ObjectStore, PresenceRepository, RepoResult};
pub use value_objects::{
    is_active, is_stale, now_millis, IdentifierError, LivenessPolicy, ObjectKey, UserName,
    WorkspaceId, DEFAULT_INACTIVITY_THRESHOLD, DEFAULT_LIVENESS_WINDOW, MAX_INACTIVITY_THRESHOLD,
    MAX_LIVENESS_WINDOW,
};
