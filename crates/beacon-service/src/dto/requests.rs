//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and, where they carry free-form fields,
//! `Validate` for input validation.

use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

// ============================================================================
// Presence Requests
// ============================================================================

/// Update presence request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePresenceRequest {
    /// Status: online, away, offline (case-insensitive)
    #[validate(length(min = 1, max = 16, message = "Status must be 1-16 characters"))]
    pub status: String,

    /// Channel the user is currently viewing
    #[validate(length(min = 1, max = 128, message = "Channel must be 1-128 characters"))]
    pub current_channel: Option<String>,
}

/// Query parameters of presence reads
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PresenceQuery {
    /// Liveness window override, in milliseconds
    pub time_window_ms: Option<u64>,
}

impl PresenceQuery {
    pub fn time_window(&self) -> Option<Duration> {
        self.time_window_ms.map(Duration::from_millis)
    }
}

/// Cleanup request; an empty body uses the configured threshold
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct CleanupRequest {
    /// Inactivity threshold override, in milliseconds
    #[validate(range(min = 1, message = "Inactivity threshold must be positive"))]
    pub inactivity_threshold_ms: Option<u64>,
}

impl CleanupRequest {
    pub fn inactivity_threshold(&self) -> Option<Duration> {
        self.inactivity_threshold_ms.map(Duration::from_millis)
    }
}

// ============================================================================
// File Requests
// ============================================================================

/// Bulk file deletion request.
///
/// Decoding fails unless `fileUrls` is present and is an array of strings.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteFilesRequest {
    #[serde(rename = "fileUrls")]
    pub file_urls: Vec<String>,
}
