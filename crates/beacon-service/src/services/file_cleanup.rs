//! File cleanup service
//!
//! Best-effort bulk deletion of uploaded files from the remote object store.
//! Each locator gets exactly one attempt; failures are counted, logged, and
//! never abort the batch.

use std::sync::Arc;
use std::time::Duration;

use beacon_core::{DeletionAttempt, DeletionFailure, DeletionSummary, ObjectKey, ObjectStore};
use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// File cleanup service
pub struct FileCleanupService<'a> {
    ctx: &'a ServiceContext,
}

/// Resolve one locator and delete its object within `timeout`
///
/// Takes owned inputs so the returned future borrows nothing from the caller.
async fn attempt_delete(store: Arc<dyn ObjectStore>, locator: String, timeout: Duration) -> DeletionAttempt {
    let Some(key) = ObjectKey::from_locator(&locator) else {
        return DeletionAttempt::failed(locator, DeletionFailure::UnresolvableLocator);
    };

    match tokio::time::timeout(timeout, store.delete_object(&key)).await {
        Ok(Ok(())) => DeletionAttempt::succeeded(locator, key),
        Ok(Err(failure)) => DeletionAttempt::failed(locator, failure),
        Err(_) => DeletionAttempt::failed(
            locator,
            DeletionFailure::Timeout {
                after_ms: timeout.as_millis() as u64,
            },
        ),
    }
}

impl<'a> FileCleanupService<'a> {
    /// Create a new FileCleanupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Delete every object named by `file_urls`.
    ///
    /// Returns counts with `deleted + failed == file_urls.len()`. Only a store
    /// client that cannot be built fails the whole request.
    #[instrument(skip(self, file_urls), fields(count = file_urls.len()))]
    pub async fn delete_files_by_urls(&self, file_urls: &[String]) -> ServiceResult<DeletionSummary> {
        if file_urls.is_empty() {
            return Ok(DeletionSummary::default());
        }

        let store = self
            .ctx
            .object_store()
            .get()
            .await
            .map_err(ServiceError::ObjectStoreUnavailable)?;
        let settings = self.ctx.deletion();

        let attempts: Vec<DeletionAttempt> = stream::iter(file_urls.to_vec())
            .map(|locator| attempt_delete(Arc::clone(&store), locator, settings.attempt_timeout))
            .buffer_unordered(settings.max_concurrency)
            .collect()
            .await;

        for attempt in &attempts {
            if let Err(reason) = &attempt.result {
                warn!(locator = %attempt.locator, reason = %reason, "Failed to delete file");
            }
        }

        let summary = DeletionSummary::from_attempts(&attempts);
        info!(
            deleted = summary.deleted,
            failed = summary.failed,
            "Bulk file deletion finished"
        );
        Ok(summary)
    }
}
