//! Process-scoped object store handle.
//!
//! The client is built on first use and shared by every request afterwards.
//! Building can fail (bad URL, unusable secret); that failure is returned to
//! the caller that triggered it and the next caller retries.

use beacon_common::ObjectStoreConfig;
use beacon_core::ObjectStore;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::StorageResult;
use crate::http::HttpObjectStore;
use crate::noop::NoopObjectStore;

/// Shared, lazily initialised object store
#[derive(Clone)]
pub struct ObjectStoreHandle {
    config: ObjectStoreConfig,
    store: Arc<OnceCell<Arc<dyn ObjectStore>>>,
}

impl std::fmt::Debug for ObjectStoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreHandle")
            .field("api_url", &self.config.api_url)
            .field("enabled", &self.config.is_enabled())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl ObjectStoreHandle {
    /// Create a handle that builds its store from `config` on first use
    #[must_use]
    pub fn from_config(config: ObjectStoreConfig) -> Self {
        Self {
            config,
            store: Arc::new(OnceCell::new()),
        }
    }

    /// Create a handle around an already built store
    #[must_use]
    pub fn with_store(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            config: ObjectStoreConfig::default(),
            store: Arc::new(OnceCell::new_with(Some(store))),
        }
    }

    /// Whether the store has been built
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.store.initialized()
    }

    /// Get the shared store, building it if this is the first use
    pub async fn get(&self) -> StorageResult<Arc<dyn ObjectStore>> {
        let store = self
            .store
            .get_or_try_init(|| async { build_store(&self.config) })
            .await?;
        Ok(Arc::clone(store))
    }
}

fn build_store(config: &ObjectStoreConfig) -> StorageResult<Arc<dyn ObjectStore>> {
    match config.secret.as_deref().filter(|_| config.is_enabled()) {
        Some(secret) => {
            let store = HttpObjectStore::new(&config.api_url, secret, config.timeout())?;
            tracing::info!(endpoint = %store.endpoint(), "Object store client initialised");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("No object store secret configured, deletions are no-ops");
            Ok(Arc::new(NoopObjectStore))
        }
    }
}
