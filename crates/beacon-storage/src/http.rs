//! HTTP client for the hosted file API.
//!
//! One deletion is one `POST {api_url}/v6/deleteFiles` carrying a single key,
//! so each object's outcome is known individually.

use async_trait::async_trait;
use beacon_core::{DeletionFailure, ObjectKey, ObjectStore};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{StorageError, StorageResult};

/// Header carrying the API secret
const API_KEY_HEADER: &str = "x-uploadthing-api-key";

/// Path of the delete endpoint relative to the API base
const DELETE_PATH: &str = "/v6/deleteFiles";

/// Longest response excerpt kept in a rejection reason
const MAX_REASON_LEN: usize = 200;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteFilesRequest<'a> {
    file_keys: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct DeleteFilesReply {
    #[serde(default)]
    success: Option<bool>,
}

/// Object store reached over the hosted file API
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpObjectStore {
    /// Build a client for `api_url` authenticated with `secret`.
    ///
    /// `connect_timeout` bounds connection setup only; callers bound the whole
    /// attempt themselves.
    pub fn new(api_url: &str, secret: &str, connect_timeout: Duration) -> StorageResult<Self> {
        let base = api_url.trim().trim_end_matches('/');
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(StorageError::InvalidConfig(format!(
                "api url must be http(s), got '{base}'"
            )));
        }

        let secret = secret.trim();
        if secret.is_empty() {
            return Err(StorageError::InvalidConfig("api secret is empty".to_string()));
        }
        let mut api_key = HeaderValue::from_str(secret).map_err(|_| {
            StorageError::InvalidConfig("api secret is not a valid header value".to_string())
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{base}{DELETE_PATH}"),
        })
    }

    /// Full URL of the delete endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Shorten a response body for use in a failure reason
fn excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_REASON_LEN) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn delete_object(&self, key: &ObjectKey) -> Result<(), DeletionFailure> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&DeleteFilesRequest {
                file_keys: [key.as_str()],
            })
            .send()
            .await
            .map_err(|e| DeletionFailure::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeletionFailure::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(DeletionFailure::Rejected(format!(
                "status {}: {}",
                status.as_u16(),
                excerpt(&body)
            )));
        }

        // An empty or non-JSON 2xx body counts as success
        let reported = serde_json::from_str::<DeleteFilesReply>(&body)
            .ok()
            .and_then(|reply| reply.success);
        if reported == Some(false) {
            return Err(DeletionFailure::Rejected(format!(
                "store reported failure: {}",
                excerpt(&body)
            )));
        }

        tracing::debug!(key = %key, "Deleted remote object");
        Ok(())
    }
}
