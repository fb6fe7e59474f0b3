//! Route definitions
//!
//! Presence routes are mounted under /api/v1; the bulk file endpoint and the
//! health probes live at the root. Only the bulk file endpoint runs without
//! the whole-request timeout.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{files, health, presence};
use crate::state::AppState;

/// Create the main API router (excluding health and file routes)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Bulk file routes
///
/// A batch reports its outcome however long it takes; each attempt is bounded
/// by the deletion timeout instead.
pub fn file_routes() -> Router<AppState> {
    Router::new().route("/deleteFiles", post(files::delete_files))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(presence_routes())
}

/// Presence routes
///
/// The static `active` and `cleanup` segments take priority over `:user_name`.
fn presence_routes() -> Router<AppState> {
    Router::new()
        // Workspace-wide queries
        .route(
            "/workspaces/:workspace_id/presence/active",
            get(presence::get_active_users),
        )
        .route(
            "/workspaces/:workspace_id/presence/active/details",
            get(presence::get_active_users_with_presence),
        )
        .route(
            "/workspaces/:workspace_id/presence/cleanup",
            post(presence::cleanup_inactive_users),
        )
        // Single user
        .route(
            "/workspaces/:workspace_id/presence/:user_name",
            put(presence::update_presence).get(presence::get_presence),
        )
        .route(
            "/workspaces/:workspace_id/presence/:user_name/heartbeat",
            post(presence::heartbeat),
        )
        .route(
            "/workspaces/:workspace_id/presence/:user_name/offline",
            post(presence::set_offline),
        )
}
