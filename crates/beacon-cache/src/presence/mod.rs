//! Presence storage module.
//!
//! Implementations of `PresenceRepository`.

mod memory_store;
mod redis_store;

pub use memory_store::MemoryPresenceStore;
pub use redis_store::RedisPresenceStore;
