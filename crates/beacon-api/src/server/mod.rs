//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use beacon_cache::{MemoryPresenceStore, RedisPool, RedisPresenceStore};
use beacon_common::{AppConfig, AppError};
use beacon_core::{LivenessPolicy, PresenceRepository};
use beacon_service::{DeletionSettings, ServiceContextBuilder};
use beacon_storage::ObjectStoreHandle;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, with_request_timeout};
use crate::routes::{create_router, file_routes, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = state.config().cors.clone();
    let is_production = state.config().app.env.is_production();

    let router = with_request_timeout(create_router().merge(health_routes()))
        .merge(file_routes())
        .with_state(state);
    apply_middleware(router, &cors, is_production)
}

/// Pick the presence store: Redis when configured, in-memory otherwise
async fn create_presence_store(config: &AppConfig) -> Result<Arc<dyn PresenceRepository>, AppError> {
    let Some(redis_config) = &config.redis else {
        warn!("REDIS_URL not set, presence is kept in process memory");
        return Ok(Arc::new(MemoryPresenceStore::new()));
    };

    info!("Connecting to Redis...");
    let pool = RedisPool::from_config(redis_config).map_err(|e| AppError::PresenceStore(e.to_string()))?;
    match pool.health_check().await {
        Ok(()) => info!("Redis connection established"),
        // The pool reconnects on demand; readiness reports the outage meanwhile
        Err(e) => warn!(error = %e, "Redis not reachable at startup"),
    }

    Ok(Arc::new(RedisPresenceStore::new(pool)))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let presence_repo = create_presence_store(&config).await?;

    // Built on the first bulk delete
    let object_store = ObjectStoreHandle::from_config(config.object_store.clone());

    let liveness = LivenessPolicy::new(
        config.presence.liveness_window(),
        config.presence.inactivity_threshold(),
    );

    let service_context = ServiceContextBuilder::new()
        .presence_repo(presence_repo)
        .object_store(object_store)
        .liveness(liveness)
        .deletion(DeletionSettings::from(&config.object_store))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr).await.map_err(AppError::Server)?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await.map_err(AppError::Server)
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let addr = tokio::net::lookup_host(&address)
        .await
        .map_err(|e| AppError::Config(format!("Invalid bind address {address}: {e}")))?
        .next()
        .ok_or_else(|| AppError::Config(format!("Bind address {address} did not resolve")))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
