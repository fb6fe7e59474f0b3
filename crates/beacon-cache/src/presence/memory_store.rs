//! In-process presence store.
//!
//! Used when no Redis is configured and by service tests. Uses `DashMap` for
//! concurrent access; shard locks make touch and cleanup atomic per record.

use async_trait::async_trait;
use beacon_core::{PresenceRecord, PresenceRepository, RepoResult, UserName, WorkspaceId};
use dashmap::DashMap;
use std::sync::Arc;

/// Presence repository held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPresenceStore {
    records: Arc<DashMap<(WorkspaceId, UserName), PresenceRecord>>,
}

impl MemoryPresenceStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all workspaces
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PresenceRepository for MemoryPresenceStore {
    async fn upsert(&self, record: &PresenceRecord) -> RepoResult<()> {
        self.records.insert(
            (record.workspace_id.clone(), record.user_name.clone()),
            record.clone(),
        );
        Ok(())
    }

    async fn find(
        &self,
        workspace_id: &WorkspaceId,
        user_name: &UserName,
    ) -> RepoResult<Option<PresenceRecord>> {
        Ok(self
            .records
            .get(&(workspace_id.clone(), user_name.clone()))
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_workspace(&self, workspace_id: &WorkspaceId) -> RepoResult<Vec<PresenceRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|entry| &entry.key().0 == workspace_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn touch(
        &self,
        workspace_id: &WorkspaceId,
        user_name: &UserName,
        now: i64,
    ) -> RepoResult<Option<PresenceRecord>> {
        Ok(self
            .records
            .get_mut(&(workspace_id.clone(), user_name.clone()))
            .map(|mut entry| {
                entry.touch(now);
                entry.value().clone()
            }))
    }

    async fn delete_stale(&self, workspace_id: &WorkspaceId, cutoff: i64) -> RepoResult<u64> {
        let mut removed = 0u64;
        // `retain` holds each shard's write lock while its predicate runs
        self.records.retain(|(ws, _), record| {
            let stale = ws == workspace_id && record.last_seen_at < cutoff;
            if stale {
                removed += 1;
            }
            !stale
        });
        Ok(removed)
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
