//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and checking responses.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use beacon_api::{create_app, create_app_state, AppState};
use beacon_cache::MemoryPresenceStore;
use beacon_common::AppConfig;
use beacon_core::ObjectStore;
use beacon_service::ServiceContextBuilder;
use beacon_storage::{NoopObjectStore, ObjectStoreHandle};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server backed by in-memory presence and a no-op object store
    pub async fn start() -> Result<Self> {
        Self::start_with_store(Arc::new(NoopObjectStore)).await
    }

    /// Start a server whose bulk deletes go to `store`
    pub async fn start_with_store(store: Arc<dyn ObjectStore>) -> Result<Self> {
        let config = test_config(|_| None)?;
        let context = ServiceContextBuilder::new()
            .presence_repo(Arc::new(MemoryPresenceStore::new()))
            .object_store(ObjectStoreHandle::with_store(store))
            .build()?;

        Self::serve(AppState::new(context, config)).await
    }

    /// Start a server wired from configuration, as the binary does
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        Self::serve(state).await
    }

    async fn serve(state: AppState) -> Result<Self> {
        let app = create_app(state);

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).send().await?)
    }

    /// Make a POST request with a raw body
    pub async fn post_raw(&self, path: &str, body: &'static str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.put(&url).json(body).send().await?)
    }
}

/// Build a test configuration from `overrides`, binding to an ephemeral port
pub fn test_config<F>(overrides: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    AppConfig::from_lookup(|key| {
        overrides(key).or_else(|| (key == "API_PORT").then(|| "0".to_string()))
    })
    .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Redis URL for store-backed tests, if the environment provides one
pub fn redis_url() -> Option<String> {
    match std::env::var("REDIS_URL") {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("Skipping test: REDIS_URL not set");
            None
        }
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
