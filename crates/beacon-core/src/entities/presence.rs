//! Presence entity - one user's liveness state within one workspace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::value_objects::{age_millis, is_active, UserName, WorkspaceId};

/// Declared presence status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    /// User is online
    Online,
    /// User is away from keyboard
    Away,
    /// User is offline
    #[default]
    Offline,
}

impl PresenceStatus {
    /// Check if this status should be visible to others
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Offline)
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Away => write!(f, "away"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for PresenceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "away" => Ok(Self::Away),
            "offline" => Ok(Self::Offline),
            _ => Err(format!("Invalid status: {s}")),
        }
    }
}

/// Presence record, keyed by `(workspace_id, user_name)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub workspace_id: WorkspaceId,
    pub user_name: UserName,
    pub status: PresenceStatus,
    /// Last heartbeat or update, Unix epoch milliseconds
    pub last_seen_at: i64,
    /// Channel the user is currently viewing
    pub current_channel: Option<String>,
}

impl PresenceRecord {
    /// Create a record last seen at `now`
    pub fn new(
        workspace_id: WorkspaceId,
        user_name: UserName,
        status: PresenceStatus,
        current_channel: Option<String>,
        now: i64,
    ) -> Self {
        Self {
            workspace_id,
            user_name,
            status,
            last_seen_at: now,
            current_channel,
        }
    }

    /// Refresh the last-seen timestamp
    pub fn touch(&mut self, now: i64) {
        self.last_seen_at = now;
    }

    /// Milliseconds since the last update, never negative
    pub fn age_millis(&self, now: i64) -> i64 {
        age_millis(self.last_seen_at, now)
    }

    /// Liveness classification at `now` for the given window
    pub fn is_active(&self, now: i64, window: Duration) -> bool {
        is_active(self, now, window)
    }

    /// Last-seen timestamp as a UTC date-time
    pub fn last_seen(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.last_seen_at).unwrap_or_default()
    }
}
