//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Workspace id no other test uses
pub fn unique_workspace() -> String {
    format!("ws-{}-{}", std::process::id(), unique_suffix())
}

/// Path of a single user's presence resource
pub fn presence_path(workspace: &str, user: &str) -> String {
    format!("/api/v1/workspaces/{workspace}/presence/{user}")
}

/// Path of a workspace-level presence resource (`active`, `cleanup`, ...)
pub fn workspace_path(workspace: &str, tail: &str) -> String {
    format!("/api/v1/workspaces/{workspace}/presence/{tail}")
}

/// Presence update request
#[derive(Debug, Serialize)]
pub struct UpdatePresenceRequest {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_channel: Option<String>,
}

impl UpdatePresenceRequest {
    pub fn online() -> Self {
        Self {
            status: "online".to_string(),
            current_channel: None,
        }
    }

    pub fn in_channel(status: &str, channel: &str) -> Self {
        Self {
            status: status.to_string(),
            current_channel: Some(channel.to_string()),
        }
    }
}

/// Presence response
#[derive(Debug, Deserialize)]
pub struct PresenceResponse {
    pub workspace_id: String,
    pub user_name: String,
    pub status: String,
    pub current_channel: Option<String>,
    pub last_seen_at: i64,
    pub active: bool,
}

/// `{"data": ...}` wrapper used by list endpoints
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Cleanup response
#[derive(Debug, Deserialize)]
pub struct CleanupResponse {
    pub removed: u64,
}

/// Bulk delete response
#[derive(Debug, Deserialize)]
pub struct DeleteFilesResponse {
    pub success: bool,
    pub deleted: usize,
    pub failed: usize,
    pub message: String,
}
