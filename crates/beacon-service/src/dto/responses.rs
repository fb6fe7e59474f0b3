//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Timestamps are exposed both as epoch milliseconds and as RFC 3339.

use beacon_core::{DeletionSummary, PresenceRecord, PresenceStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Presence Responses
// ============================================================================

/// Presence response
#[derive(Debug, Clone, Serialize)]
pub struct PresenceResponse {
    pub workspace_id: String,
    pub user_name: String,
    pub status: PresenceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_channel: Option<String>,
    pub last_seen_at: i64,
    pub last_seen: DateTime<Utc>,
    /// Liveness at response time for the window the caller used
    pub active: bool,
}

impl PresenceResponse {
    /// Build a response, classifying the record at `now` against `window`
    pub fn from_record(record: PresenceRecord, now: i64, window: Duration) -> Self {
        let active = record.is_active(now, window);
        let last_seen = record.last_seen();
        Self {
            workspace_id: record.workspace_id.into(),
            user_name: record.user_name.into(),
            status: record.status,
            current_channel: record.current_channel,
            last_seen_at: record.last_seen_at,
            last_seen,
            active,
        }
    }
}

/// Cleanup response
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CleanupResponse {
    pub removed: u64,
}

// ============================================================================
// File Responses
// ============================================================================

/// Bulk file deletion response
#[derive(Debug, Clone, Serialize)]
pub struct DeleteFilesResponse {
    pub success: bool,
    pub deleted: usize,
    pub failed: usize,
    pub message: String,
}

impl From<DeletionSummary> for DeleteFilesResponse {
    fn from(summary: DeletionSummary) -> Self {
        let message = if summary.total() == 0 {
            "No files to delete".to_string()
        } else {
            format!(
                "Deleted {} files, {} failed",
                summary.deleted, summary.failed
            )
        };

        Self {
            success: true,
            deleted: summary.deleted,
            failed: summary.failed,
            message,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub presence_store: String,
}

impl ReadinessResponse {
    pub fn ready(presence_store_healthy: bool) -> Self {
        Self {
            status: if presence_store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                presence_store: if presence_store_healthy { "healthy" } else { "unhealthy" }
                    .to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::{UserName, WorkspaceId};
    use serde_json::json;

    #[test]
    fn test_presence_response_serialization() {
        let record = PresenceRecord::new(
            WorkspaceId::parse("W1").unwrap(),
            UserName::parse("alice").unwrap(),
            PresenceStatus::Online,
            Some("general".to_string()),
            1_700_000_000_000,
        );
        let response =
            PresenceResponse::from_record(record, 1_700_000_060_000, Duration::from_secs(300));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["workspace_id"], "W1");
        assert_eq!(value["user_name"], "alice");
        assert_eq!(value["status"], "online");
        assert_eq!(value["current_channel"], "general");
        assert_eq!(value["last_seen_at"], 1_700_000_000_000_i64);
        assert_eq!(value["active"], true);
    }

    #[test]
    fn test_delete_files_messages() {
        let empty = DeleteFilesResponse::from(DeletionSummary::default());
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            json!({"success": true, "deleted": 0, "failed": 0, "message": "No files to delete"})
        );

        let partial = DeleteFilesResponse::from(DeletionSummary {
            deleted: 2,
            failed: 1,
        });
        assert!(partial.success);
        assert_eq!(partial.message, "Deleted 2 files, 1 failed");
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.presence_store, "healthy");

        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.presence_store, "unhealthy");
    }
}
