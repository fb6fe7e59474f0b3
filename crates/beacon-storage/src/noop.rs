//! Pass-through object store used when no remote store is configured

use async_trait::async_trait;
use beacon_core::{DeletionFailure, ObjectKey, ObjectStore};

/// Object store that accepts every deletion without a remote call
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObjectStore;

#[async_trait]
impl ObjectStore for NoopObjectStore {
    async fn delete_object(&self, key: &ObjectKey) -> Result<(), DeletionFailure> {
        tracing::debug!(key = %key, "Object store not configured, skipping delete");
        Ok(())
    }
}
