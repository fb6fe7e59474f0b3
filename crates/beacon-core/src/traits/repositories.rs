//! Repository traits (ports) - define the interface for presence persistence
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::PresenceRecord;
use crate::error::DomainError;
use crate::value_objects::{UserName, WorkspaceId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Presence Repository
// ============================================================================

/// Storage of presence records keyed by `(workspace_id, user_name)`.
///
/// Writes are last-write-wins by arrival; implementations never merge.
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// Insert or overwrite the record for its `(workspace_id, user_name)` key
    async fn upsert(&self, record: &PresenceRecord) -> RepoResult<()>;

    /// Find the record of one user in a workspace
    async fn find(
        &self,
        workspace_id: &WorkspaceId,
        user_name: &UserName,
    ) -> RepoResult<Option<PresenceRecord>>;

    /// List every record of a workspace, in no particular order
    async fn find_by_workspace(&self, workspace_id: &WorkspaceId) -> RepoResult<Vec<PresenceRecord>>;

    /// Set `last_seen_at` of an existing record, keeping status and channel.
    ///
    /// Must be atomic with respect to concurrent `upsert` calls. Returns the
    /// refreshed record, or `None` when no record exists.
    async fn touch(
        &self,
        workspace_id: &WorkspaceId,
        user_name: &UserName,
        now: i64,
    ) -> RepoResult<Option<PresenceRecord>>;

    /// Delete every record of a workspace last seen strictly before `cutoff`.
    ///
    /// The staleness check and the delete must happen against one consistent
    /// read of each record: a record refreshed concurrently must survive.
    /// Returns the number of removed records.
    async fn delete_stale(&self, workspace_id: &WorkspaceId, cutoff: i64) -> RepoResult<u64>;

    /// Check connectivity to the backing store
    async fn health_check(&self) -> RepoResult<()>;
}
