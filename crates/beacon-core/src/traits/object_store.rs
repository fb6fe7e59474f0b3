//! Remote object store port

use async_trait::async_trait;

use crate::entities::DeletionFailure;
use crate::value_objects::ObjectKey;

/// A remote store holding uploaded objects (media attachments and the like)
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Delete one object.
    ///
    /// Every failure is reported as a value; implementations never panic on
    /// remote errors.
    async fn delete_object(&self, key: &ObjectKey) -> Result<(), DeletionFailure>;
}
