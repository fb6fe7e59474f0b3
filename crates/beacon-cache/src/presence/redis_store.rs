//! Redis-backed presence store.
//!
//! Each workspace is one hash (`presence:{workspace_id}`) whose fields are user
//! names and whose values are JSON-encoded presence records. Touch and cleanup
//! run as Lua scripts so the read and the write of a record happen atomically.

use async_trait::async_trait;
use beacon_core::{
    DomainError, PresenceRecord, PresenceRepository, RepoResult, UserName, WorkspaceId,
};
use redis::Script;
use std::sync::Arc;
use tracing::instrument;

use crate::pool::{RedisPool, RedisPoolError};

/// Key prefix for workspace presence hashes
const PRESENCE_PREFIX: &str = "presence:";

/// Refresh `last_seen_at` of one record, returning the updated JSON or nil.
const TOUCH_SCRIPT: &str = r"
local raw = redis.call('HGET', KEYS[1], ARGV[1])
if not raw then
    return false
end
local record = cjson.decode(raw)
record['last_seen_at'] = tonumber(ARGV[2])
local updated = cjson.encode(record)
redis.call('HSET', KEYS[1], ARGV[1], updated)
return updated
";

/// Remove every record last seen strictly before the cutoff, returning the count.
const DELETE_STALE_SCRIPT: &str = r"
local cutoff = tonumber(ARGV[1])
local entries = redis.call('HGETALL', KEYS[1])
local removed = 0
for i = 1, #entries, 2 do
    local ok, record = pcall(cjson.decode, entries[i + 1])
    if ok and type(record) == 'table' then
        local last_seen = tonumber(record['last_seen_at'])
        if last_seen and last_seen < cutoff then
            redis.call('HDEL', KEYS[1], entries[i])
            removed = removed + 1
        end
    end
end
return removed
";

/// Convert a Redis pool error into a domain error
fn map_redis_error(e: RedisPoolError) -> DomainError {
    DomainError::StoreError(e.to_string())
}

/// Presence repository backed by Redis hashes
#[derive(Clone)]
pub struct RedisPresenceStore {
    pool: RedisPool,
    touch_script: Arc<Script>,
    delete_stale_script: Arc<Script>,
}

impl std::fmt::Debug for RedisPresenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPresenceStore")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl RedisPresenceStore {
    /// Create a new presence store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            touch_script: Arc::new(Script::new(TOUCH_SCRIPT)),
            delete_stale_script: Arc::new(Script::new(DELETE_STALE_SCRIPT)),
        }
    }

    /// Generate Redis key for a workspace's presence hash
    fn presence_key(workspace_id: &WorkspaceId) -> String {
        format!("{PRESENCE_PREFIX}{workspace_id}")
    }
}

#[async_trait]
impl PresenceRepository for RedisPresenceStore {
    #[instrument(skip(self, record), fields(workspace_id = %record.workspace_id, user_name = %record.user_name))]
    async fn upsert(&self, record: &PresenceRecord) -> RepoResult<()> {
        let key = Self::presence_key(&record.workspace_id);
        self.pool
            .hset_json(&key, record.user_name.as_str(), record)
            .await
            .map_err(map_redis_error)?;

        tracing::debug!(status = %record.status, "Set presence");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        workspace_id: &WorkspaceId,
        user_name: &UserName,
    ) -> RepoResult<Option<PresenceRecord>> {
        let key = Self::presence_key(workspace_id);
        self.pool
            .hget_json(&key, user_name.as_str())
            .await
            .map_err(map_redis_error)
    }

    #[instrument(skip(self))]
    async fn find_by_workspace(&self, workspace_id: &WorkspaceId) -> RepoResult<Vec<PresenceRecord>> {
        let key = Self::presence_key(workspace_id);
        let values = self.pool.hvals(&key).await.map_err(map_redis_error)?;

        let mut records = Vec::with_capacity(values.len());
        for raw in values {
            match serde_json::from_str::<PresenceRecord>(&raw) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(error = %e, "Skipping undecodable presence record"),
            }
        }
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn touch(
        &self,
        workspace_id: &WorkspaceId,
        user_name: &UserName,
        now: i64,
    ) -> RepoResult<Option<PresenceRecord>> {
        let key = Self::presence_key(workspace_id);
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;

        let updated: Option<String> = self
            .touch_script
            .key(&key)
            .arg(user_name.as_str())
            .arg(now)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| map_redis_error(e.into()))?;

        updated
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(|e| map_redis_error(e.into()))
    }

    #[instrument(skip(self))]
    async fn delete_stale(&self, workspace_id: &WorkspaceId, cutoff: i64) -> RepoResult<u64> {
        let key = Self::presence_key(workspace_id);
        let mut conn = self.pool.get().await.map_err(map_redis_error)?;

        let removed: u64 = self
            .delete_stale_script
            .key(&key)
            .arg(cutoff)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| map_redis_error(e.into()))?;

        Ok(removed)
    }

    async fn health_check(&self) -> RepoResult<()> {
        self.pool.health_check().await.map_err(map_redis_error)
    }
}
