//! API Integration Tests
//!
//! Most tests run against in-memory presence and need no services. The
//! Redis-backed test requires REDIS_URL and is skipped without it.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use beacon_core::{DeletionFailure, ObjectKey, ObjectStore};
use integration_tests::{
    assert_json, assert_status, fixtures::*, redis_url, test_config, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Records every key and rejects the ones listed
#[derive(Default)]
struct RecordingStore {
    reject: Vec<&'static str>,
    deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn delete_object(&self, key: &ObjectKey) -> Result<(), DeletionFailure> {
        if self.reject.contains(&key.as_str()) {
            return Err(DeletionFailure::Rejected("status 404: not found".to_string()));
        }
        self.deleted.lock().unwrap().push(key.as_str().to_string());
        Ok(())
    }
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["presence_store"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Bulk Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_files_partial_failure() {
    let store = Arc::new(RecordingStore {
        reject: vec!["def456"],
        ..RecordingStore::default()
    });
    let server = TestServer::start_with_store(store.clone()).await.unwrap();

    let body = json!({
        "fileUrls": [
            "https://utfs.io/f/abc123",
            "https://utfs.io/f/def456",
            "https://utfs.io/f/ghi789?download=1",
        ]
    });
    let response = server.post("/deleteFiles", &body).await.unwrap();
    let result: DeleteFilesResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(result.success);
    assert_eq!(result.deleted, 2);
    assert_eq!(result.failed, 1);
    assert_eq!(result.message, "Deleted 2 files, 1 failed");

    let mut deleted = store.deleted.lock().unwrap().clone();
    deleted.sort();
    assert_eq!(deleted, vec!["abc123", "ghi789"]);
}

#[tokio::test]
async fn test_delete_files_empty_list() {
    let server = TestServer::start().await.unwrap();

    let response = server
        .post("/deleteFiles", &json!({ "fileUrls": [] }))
        .await
        .unwrap();
    let result: DeleteFilesResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(result.success);
    assert_eq!(result.deleted, 0);
    assert_eq!(result.failed, 0);
    assert_eq!(result.message, "No files to delete");
}

#[tokio::test]
async fn test_delete_files_requires_array() {
    let server = TestServer::start().await.unwrap();

    for body in [r"{}", r#"{"fileUrls": "https://utfs.io/f/a"}"#, "garbage"] {
        let response = server.post_raw("/deleteFiles", body).await.unwrap();
        let error: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(error, json!({ "error": "fileUrls array is required" }));
    }
}

#[tokio::test]
async fn test_delete_files_store_unavailable() {
    let config = test_config(|key| match key {
        "OBJECT_STORE_API_URL" => Some("ftp://files.invalid".to_string()),
        "OBJECT_STORE_SECRET" => Some("sk_test".to_string()),
        _ => None,
    })
    .unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();

    let response = server
        .post("/deleteFiles", &json!({ "fileUrls": ["https://utfs.io/f/a"] }))
        .await
        .unwrap();
    let error: Value = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(error["error"], "Failed to delete files");
    assert!(error["details"].is_string());
}

// ============================================================================
// Presence Tests
// ============================================================================

#[tokio::test]
async fn test_update_and_get_presence() {
    let server = TestServer::start().await.unwrap();
    let ws = unique_workspace();

    let response = server
        .put(
            &presence_path(&ws, "alice"),
            &UpdatePresenceRequest::in_channel("Away", "general"),
        )
        .await
        .unwrap();
    let updated: PresenceResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.workspace_id, ws);
    assert_eq!(updated.user_name, "alice");
    assert_eq!(updated.status, "away");
    assert_eq!(updated.current_channel.as_deref(), Some("general"));
    assert!(updated.active);

    let response = server.get(&presence_path(&ws, "alice")).await.unwrap();
    let fetched: PresenceResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.last_seen_at, updated.last_seen_at);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let server = TestServer::start().await.unwrap();
    let ws = unique_workspace();

    let response = server.get(&presence_path(&ws, "ghost")).await.unwrap();
    let error: Value = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error["error"]["code"], "UNKNOWN_PRESENCE");

    let response = server
        .post_empty(&format!("{}/heartbeat", presence_path(&ws, "ghost")))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_route_segment_user_names_are_unaddressable() {
    let server = TestServer::start().await.unwrap();
    let ws = unique_workspace();

    // The static listing route owns this path
    let response = server
        .put(&presence_path(&ws, "active"), &UpdatePresenceRequest::online())
        .await
        .unwrap();
    assert_status(response, StatusCode::METHOD_NOT_ALLOWED).await.unwrap();

    let response = server
        .post_empty(&format!("{}/heartbeat", presence_path(&ws, "cleanup")))
        .await
        .unwrap();
    let error: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["error"]["code"], "INVALID_IDENTIFIER");

    // Matching is case-sensitive, so only the exact segments are reserved
    let response = server
        .put(&presence_path(&ws, "Active"), &UpdatePresenceRequest::online())
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_active_users_respect_window_and_offline() {
    let server = TestServer::start().await.unwrap();
    let ws = unique_workspace();

    for user in ["bob", "alice", "carol"] {
        let response = server
            .put(&presence_path(&ws, user), &UpdatePresenceRequest::online())
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server
        .post_empty(&format!("{}/offline", presence_path(&ws, "carol")))
        .await
        .unwrap();
    let offline: PresenceResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(offline.status, "offline");
    assert!(!offline.active);

    let response = server.get(&workspace_path(&ws, "active")).await.unwrap();
    let active: DataResponse<Vec<String>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(active.data, vec!["alice", "bob"]);

    let response = server
        .get(&workspace_path(&ws, "active/details"))
        .await
        .unwrap();
    let details: DataResponse<Vec<PresenceResponse>> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(details.data.len(), 2);
    assert!(details.data.iter().all(|p| p.active && p.status == "online"));

    // A tiny window leaves nobody active once time has passed
    tokio::time::sleep(Duration::from_millis(50)).await;
    let response = server
        .get(&format!("{}?time_window_ms=10", workspace_path(&ws, "active")))
        .await
        .unwrap();
    let active: DataResponse<Vec<String>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.data.is_empty());
}

#[tokio::test]
async fn test_heartbeat_keeps_status() {
    let server = TestServer::start().await.unwrap();
    let ws = unique_workspace();

    let response = server
        .put(
            &presence_path(&ws, "dave"),
            &UpdatePresenceRequest::in_channel("away", "ops"),
        )
        .await
        .unwrap();
    let first: PresenceResponse = assert_json(response, StatusCode::OK).await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;
    let response = server
        .post_empty(&format!("{}/heartbeat", presence_path(&ws, "dave")))
        .await
        .unwrap();
    let beat: PresenceResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(beat.status, "away");
    assert_eq!(beat.current_channel.as_deref(), Some("ops"));
    assert!(beat.last_seen_at >= first.last_seen_at);
}

#[tokio::test]
async fn test_cleanup_removes_stale_users() {
    let server = TestServer::start().await.unwrap();
    let ws = unique_workspace();

    for user in ["erin", "frank"] {
        server
            .put(&presence_path(&ws, user), &UpdatePresenceRequest::online())
            .await
            .unwrap();
    }

    // Default threshold keeps fresh records
    let response = server
        .post_empty(&workspace_path(&ws, "cleanup"))
        .await
        .unwrap();
    let kept: CleanupResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(kept.removed, 0);

    tokio::time::sleep(Duration::from_millis(30)).await;
    let response = server
        .post(
            &workspace_path(&ws, "cleanup"),
            &json!({ "inactivity_threshold_ms": 10 }),
        )
        .await
        .unwrap();
    let cleaned: CleanupResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cleaned.removed, 2);

    let response = server.get(&presence_path(&ws, "erin")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_invalid_presence_input() {
    let server = TestServer::start().await.unwrap();
    let ws = unique_workspace();

    let response = server
        .put(
            &presence_path(&ws, "gina"),
            &UpdatePresenceRequest::in_channel("sleeping", "general"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get(&format!("{}?time_window_ms=0", workspace_path(&ws, "active")))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get(&format!("{}?time_window_ms=soon", workspace_path(&ws, "active")))
        .await
        .unwrap();
    let error: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error["error"]["code"], "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_workspaces_are_isolated() {
    let server = TestServer::start().await.unwrap();
    let ws_a = unique_workspace();
    let ws_b = unique_workspace();

    server
        .put(&presence_path(&ws_a, "henry"), &UpdatePresenceRequest::online())
        .await
        .unwrap();

    let response = server.get(&workspace_path(&ws_b, "active")).await.unwrap();
    let active: DataResponse<Vec<String>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.data.is_empty());
}

// ============================================================================
// Redis-backed Presence
// ============================================================================

#[tokio::test]
async fn test_presence_round_trip_through_redis() {
    let Some(url) = redis_url() else {
        return;
    };

    let config = test_config(|key| (key == "REDIS_URL").then(|| url.clone())).unwrap();
    let server = TestServer::start_with_config(config).await.unwrap();
    let ws = unique_workspace();

    let response = server
        .put(&presence_path(&ws, "ivy"), &UpdatePresenceRequest::online())
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&workspace_path(&ws, "active")).await.unwrap();
    let active: DataResponse<Vec<String>> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(active.data, vec!["ivy"]);

    tokio::time::sleep(Duration::from_millis(30)).await;
    let response = server
        .post(
            &workspace_path(&ws, "cleanup"),
            &json!({ "inactivity_threshold_ms": 10 }),
        )
        .await
        .unwrap();
    let cleaned: CleanupResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(cleaned.removed, 1);
}
