//! Service context - dependency container for services
//!
//! Holds the presence repository, the object store handle, and the thresholds
//! services need.

use std::sync::Arc;
use std::time::Duration;

use beacon_common::ObjectStoreConfig;
use beacon_core::{LivenessPolicy, PresenceRepository};
use beacon_storage::ObjectStoreHandle;

use super::error::{ServiceError, ServiceResult};

/// Fan-out and timeout applied to bulk deletions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionSettings {
    /// Maximum number of deletions in flight at once
    pub max_concurrency: usize,
    /// Upper bound on a single deletion attempt
    pub attempt_timeout: Duration,
}

impl Default for DeletionSettings {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            attempt_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&ObjectStoreConfig> for DeletionSettings {
    fn from(config: &ObjectStoreConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency.max(1),
            attempt_timeout: config.timeout(),
        }
    }
}

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// It provides access to:
/// - The presence repository (Redis or in-memory)
/// - The lazily built object store
/// - Liveness thresholds and bulk deletion settings
#[derive(Clone)]
pub struct ServiceContext {
    presence_repo: Arc<dyn PresenceRepository>,
    object_store: ObjectStoreHandle,
    liveness: LivenessPolicy,
    deletion: DeletionSettings,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        presence_repo: Arc<dyn PresenceRepository>,
        object_store: ObjectStoreHandle,
        liveness: LivenessPolicy,
        deletion: DeletionSettings,
    ) -> Self {
        Self {
            presence_repo,
            object_store,
            liveness,
            deletion,
        }
    }

    /// Get the presence repository
    pub fn presence_repo(&self) -> &dyn PresenceRepository {
        self.presence_repo.as_ref()
    }

    /// Get the object store handle
    pub fn object_store(&self) -> &ObjectStoreHandle {
        &self.object_store
    }

    pub fn liveness(&self) -> LivenessPolicy {
        self.liveness
    }

    pub fn deletion(&self) -> DeletionSettings {
        self.deletion
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("presence_repo", &"PresenceRepository")
            .field("object_store", &self.object_store)
            .field("liveness", &self.liveness)
            .field("deletion", &self.deletion)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    presence_repo: Option<Arc<dyn PresenceRepository>>,
    object_store: Option<ObjectStoreHandle>,
    liveness: Option<LivenessPolicy>,
    deletion: Option<DeletionSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presence_repo(mut self, repo: Arc<dyn PresenceRepository>) -> Self {
        self.presence_repo = Some(repo);
        self
    }

    pub fn object_store(mut self, handle: ObjectStoreHandle) -> Self {
        self.object_store = Some(handle);
        self
    }

    pub fn liveness(mut self, policy: LivenessPolicy) -> Self {
        self.liveness = Some(policy);
        self
    }

    pub fn deletion(mut self, settings: DeletionSettings) -> Self {
        self.deletion = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Config` if a required dependency is missing
    /// or the thresholds are inconsistent
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let liveness = self.liveness.unwrap_or_default();
        if liveness.liveness_window.is_zero()
            || liveness.inactivity_threshold <= liveness.liveness_window
        {
            return Err(ServiceError::config(
                "inactivity threshold must exceed a non-zero liveness window",
            ));
        }

        let deletion = self.deletion.unwrap_or_default();
        if deletion.max_concurrency == 0 || deletion.attempt_timeout.is_zero() {
            return Err(ServiceError::config(
                "deletion concurrency and timeout must be non-zero",
            ));
        }

        Ok(ServiceContext::new(
            self.presence_repo
                .ok_or_else(|| ServiceError::config("presence_repo is required"))?,
            self.object_store
                .ok_or_else(|| ServiceError::config("object_store is required"))?,
            liveness,
            deletion,
        ))
    }
}
