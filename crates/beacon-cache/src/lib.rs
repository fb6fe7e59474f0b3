//! # beacon-cache
//!
//! Presence persistence for the liveness tracker.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Redis Presence Store**: One hash per workspace, atomic touch and cleanup via Lua
//! - **Memory Presence Store**: `DashMap`-backed fallback when Redis is not configured
//!
//! ## Example
//!
//! ```ignore
//! use beacon_cache::{RedisPool, RedisPoolConfig, RedisPresenceStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let store = RedisPresenceStore::new(pool);
//!
//! let record = PresenceRecord::new(workspace_id, user_name, PresenceStatus::Online, None, now_millis());
//! store.upsert(&record).await?;
//! ```

pub mod pool;
pub mod presence;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export presence stores
pub use presence::{MemoryPresenceStore, RedisPresenceStore};
