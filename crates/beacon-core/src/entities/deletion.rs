//! Bulk deletion outcomes
//!
//! Every locator handed to a bulk delete produces exactly one attempt, and
//! every attempt lands in exactly one of the two summary counters.

use serde::Serialize;

use crate::value_objects::ObjectKey;

/// Why a single object deletion failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeletionFailure {
    #[error("locator does not name an object")]
    UnresolvableLocator,

    #[error("object store rejected the deletion: {0}")]
    Rejected(String),

    #[error("object store request failed: {0}")]
    Transport(String),

    #[error("deletion timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
}

/// Outcome of one locator's deletion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionAttempt {
    pub locator: String,
    pub result: Result<ObjectKey, DeletionFailure>,
}

impl DeletionAttempt {
    pub fn succeeded(locator: impl Into<String>, key: ObjectKey) -> Self {
        Self {
            locator: locator.into(),
            result: Ok(key),
        }
    }

    pub fn failed(locator: impl Into<String>, failure: DeletionFailure) -> Self {
        Self {
            locator: locator.into(),
            result: Err(failure),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate counts of a bulk deletion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeletionSummary {
    pub deleted: usize,
    pub failed: usize,
}

impl DeletionSummary {
    /// Count successes and failures over a batch of attempts
    pub fn from_attempts<'a>(attempts: impl IntoIterator<Item = &'a DeletionAttempt>) -> Self {
        attempts
            .into_iter()
            .fold(Self::default(), |mut summary, attempt| {
                if attempt.is_success() {
                    summary.deleted += 1;
                } else {
                    summary.failed += 1;
                }
                summary
            })
    }

    /// Number of attempts accounted for
    #[inline]
    pub fn total(&self) -> usize {
        self.deleted + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> ObjectKey {
        ObjectKey::from_locator(s).unwrap()
    }

    #[test]
    fn test_summary_counts_every_attempt_once() {
        let attempts = vec![
            DeletionAttempt::succeeded("urlA", key("a")),
            DeletionAttempt::failed("urlB", DeletionFailure::Rejected("not found".to_string())),
            DeletionAttempt::succeeded("urlC", key("c")),
            DeletionAttempt::failed("", DeletionFailure::UnresolvableLocator),
        ];

        let summary = DeletionSummary::from_attempts(&attempts);
        assert_eq!(summary.deleted, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.total(), attempts.len());
    }

    #[test]
    fn test_empty_summary() {
        let summary = DeletionSummary::from_attempts(&Vec::<DeletionAttempt>::new());
        assert_eq!(summary, DeletionSummary::default());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(
            DeletionFailure::Timeout { after_ms: 250 }.to_string(),
            "deletion timed out after 250ms"
        );
        assert_eq!(
            DeletionFailure::UnresolvableLocator.to_string(),
            "locator does not name an object"
        );
    }
}
