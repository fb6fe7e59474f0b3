//! Presence handlers
//!
//! Endpoints for recording and querying per-workspace user presence.

use axum::{extract::State, Json};
use beacon_service::{
    ApiResponse, CleanupRequest, CleanupResponse, PresenceQuery, PresenceResponse,
    PresenceService, UpdatePresenceRequest,
};

use crate::extractors::{
    OptionalValidatedJson, PathParams, PresencePath, QueryParams, ValidatedJson, WorkspacePath,
};
use crate::response::ApiResult;
use crate::state::AppState;

/// Update a user's presence
///
/// PUT /workspaces/{workspace_id}/presence/{user_name}
pub async fn update_presence(
    State(state): State<AppState>,
    PathParams(path): PathParams<PresencePath>,
    ValidatedJson(request): ValidatedJson<UpdatePresenceRequest>,
) -> ApiResult<Json<PresenceResponse>> {
    let service = PresenceService::new(state.service_context());
    let response = service
        .update_presence(&path.workspace_id, &path.user_name, request)
        .await?;
    Ok(Json(response))
}

/// Refresh a user's last-seen time
///
/// POST /workspaces/{workspace_id}/presence/{user_name}/heartbeat
pub async fn heartbeat(
    State(state): State<AppState>,
    PathParams(path): PathParams<PresencePath>,
) -> ApiResult<Json<PresenceResponse>> {
    let service = PresenceService::new(state.service_context());
    let response = service
        .heartbeat(&path.workspace_id, &path.user_name)
        .await?;
    Ok(Json(response))
}

/// Mark a user offline
///
/// POST /workspaces/{workspace_id}/presence/{user_name}/offline
pub async fn set_offline(
    State(state): State<AppState>,
    PathParams(path): PathParams<PresencePath>,
) -> ApiResult<Json<PresenceResponse>> {
    let service = PresenceService::new(state.service_context());
    let response = service
        .set_offline(&path.workspace_id, &path.user_name)
        .await?;
    Ok(Json(response))
}

/// Get one user's presence
///
/// GET /workspaces/{workspace_id}/presence/{user_name}
pub async fn get_presence(
    State(state): State<AppState>,
    PathParams(path): PathParams<PresencePath>,
    QueryParams(query): QueryParams<PresenceQuery>,
) -> ApiResult<Json<PresenceResponse>> {
    let service = PresenceService::new(state.service_context());
    let response = service
        .get_presence(&path.workspace_id, &path.user_name, query.time_window())
        .await?;
    Ok(Json(response))
}

/// List the names of active users
///
/// GET /workspaces/{workspace_id}/presence/active
pub async fn get_active_users(
    State(state): State<AppState>,
    PathParams(path): PathParams<WorkspacePath>,
    QueryParams(query): QueryParams<PresenceQuery>,
) -> ApiResult<Json<ApiResponse<Vec<String>>>> {
    let service = PresenceService::new(state.service_context());
    let names = service
        .get_active_users(&path.workspace_id, query.time_window())
        .await?;
    Ok(Json(ApiResponse::new(names)))
}

/// List active users with their presence records
///
/// GET /workspaces/{workspace_id}/presence/active/details
pub async fn get_active_users_with_presence(
    State(state): State<AppState>,
    PathParams(path): PathParams<WorkspacePath>,
    QueryParams(query): QueryParams<PresenceQuery>,
) -> ApiResult<Json<ApiResponse<Vec<PresenceResponse>>>> {
    let service = PresenceService::new(state.service_context());
    let records = service
        .get_active_users_with_presence(&path.workspace_id, query.time_window())
        .await?;
    Ok(Json(ApiResponse::new(records)))
}

/// Remove inactive users
///
/// POST /workspaces/{workspace_id}/presence/cleanup
pub async fn cleanup_inactive_users(
    State(state): State<AppState>,
    PathParams(path): PathParams<WorkspacePath>,
    OptionalValidatedJson(request): OptionalValidatedJson<CleanupRequest>,
) -> ApiResult<Json<CleanupResponse>> {
    let request = request.unwrap_or_default();
    let service = PresenceService::new(state.service_context());
    let removed = service
        .cleanup_inactive_users(&path.workspace_id, request.inactivity_threshold())
        .await?;
    Ok(Json(CleanupResponse { removed }))
}
