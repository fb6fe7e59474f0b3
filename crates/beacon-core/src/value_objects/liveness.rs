//! Liveness rules
//!
//! Two independent thresholds govern presence:
//!
//! - the **liveness window** decides whether a user is "active now";
//! - the **inactivity threshold** decides when a record is stale enough to be
//!   garbage-collected.
//!
//! Classification is computed on every read from `(record, now, window)` and is
//! never stored.

use std::time::Duration;

use crate::entities::PresenceRecord;

/// Default liveness window (5 minutes)
pub const DEFAULT_LIVENESS_WINDOW: Duration = Duration::from_secs(5 * 60);
/// Default inactivity threshold for cleanup (30 minutes)
pub const DEFAULT_INACTIVITY_THRESHOLD: Duration = Duration::from_secs(30 * 60);
/// Upper bound for a caller-supplied liveness window (24 hours)
pub const MAX_LIVENESS_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);
/// Upper bound for a caller-supplied inactivity threshold (30 days)
pub const MAX_INACTIVITY_THRESHOLD: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Current time as Unix epoch milliseconds
#[inline]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Convert a duration to whole milliseconds, saturating at `i64::MAX`
#[inline]
pub(crate) fn duration_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Milliseconds elapsed between `last_seen_at` and `now`.
///
/// A timestamp in the future (clock skew between writers) has age zero.
#[inline]
pub(crate) fn age_millis(last_seen_at: i64, now: i64) -> i64 {
    now.saturating_sub(last_seen_at).max(0)
}

/// Whether a record counts as active at `now`.
///
/// Active iff `now - last_seen_at <= window` and the declared status is not
/// `offline`.
pub fn is_active(record: &PresenceRecord, now: i64, window: Duration) -> bool {
    record.status.is_visible()
        && age_millis(record.last_seen_at, now) <= duration_millis(window)
}

/// Whether a record last seen at `last_seen_at` has exceeded `threshold` at `now`.
///
/// A record whose age equals the threshold is not yet stale.
pub fn is_stale(last_seen_at: i64, now: i64, threshold: Duration) -> bool {
    age_millis(last_seen_at, now) > duration_millis(threshold)
}

/// The pair of presence thresholds in effect for a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessPolicy {
    /// Window used to classify a user as active
    pub liveness_window: Duration,
    /// Age after which a record may be removed by cleanup
    pub inactivity_threshold: Duration,
}

impl Default for LivenessPolicy {
    fn default() -> Self {
        Self {
            liveness_window: DEFAULT_LIVENESS_WINDOW,
            inactivity_threshold: DEFAULT_INACTIVITY_THRESHOLD,
        }
    }
}

impl LivenessPolicy {
    /// Create a policy from explicit thresholds
    #[must_use]
    pub fn new(liveness_window: Duration, inactivity_threshold: Duration) -> Self {
        Self {
            liveness_window,
            inactivity_threshold,
        }
    }

    /// Resolve the window for a query, falling back to the configured default
    #[must_use]
    pub fn window_or_default(&self, requested: Option<Duration>) -> Duration {
        requested.unwrap_or(self.liveness_window)
    }

    /// Resolve the cleanup threshold, falling back to the configured default
    #[must_use]
    pub fn threshold_or_default(&self, requested: Option<Duration>) -> Duration {
        requested.unwrap_or(self.inactivity_threshold)
    }

    /// Cutoff timestamp for cleanup: records last seen strictly before it are stale
    #[must_use]
    pub fn stale_cutoff(now: i64, threshold: Duration) -> i64 {
        now.saturating_sub(duration_millis(threshold))
    }
}
