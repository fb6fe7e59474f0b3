//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Extract path parameters, rejecting with `ApiError::InvalidPath`
#[derive(Debug, Clone)]
pub struct PathParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(PathParams(inner))
    }
}

/// Path parameters with workspace_id
#[derive(Debug, serde::Deserialize)]
pub struct WorkspacePath {
    pub workspace_id: String,
}

/// Path parameters with workspace_id and user_name
#[derive(Debug, serde::Deserialize)]
pub struct PresencePath {
    pub workspace_id: String,
    pub user_name: String,
}
