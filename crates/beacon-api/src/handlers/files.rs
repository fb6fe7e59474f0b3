//! File cleanup handlers
//!
//! `POST /deleteFiles` answers errors with a flat body
//! (`{"error": ..., "details": ...}`) rather than the API error envelope.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use beacon_service::{DeleteFilesRequest, DeleteFilesResponse, FileCleanupService, ServiceError};
use serde::Serialize;
use tracing::error;

use crate::state::AppState;

/// Failures of the bulk delete endpoint
#[derive(Debug, thiserror::Error)]
pub enum DeleteFilesError {
    #[error("fileUrls array is required")]
    MissingFileUrls,

    /// Oversized or interrupted body
    #[error("Failed to read request body")]
    UnreadableBody(#[source] BytesRejection),

    #[error("Failed to delete files")]
    Failed(#[source] ServiceError),
}

#[derive(Debug, Serialize)]
struct DeleteFilesErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for DeleteFilesError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            Self::MissingFileUrls => (StatusCode::BAD_REQUEST, None),
            Self::UnreadableBody(rejection) => (rejection.status(), Some(rejection.body_text())),
            Self::Failed(e) => {
                error!(error = %e, "Bulk file deletion failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string()))
            }
        };

        let body = DeleteFilesErrorBody {
            error: self.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}

/// Delete uploaded files by their public URLs
///
/// POST /deleteFiles
pub async fn delete_files(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DeleteFilesResponse>, DeleteFilesError> {
    let body = body.map_err(DeleteFilesError::UnreadableBody)?;
    // Decoding fails for non-JSON bodies, a missing or non-array `fileUrls`,
    // and non-string entries
    let request: DeleteFilesRequest =
        serde_json::from_slice(&body).map_err(|_| DeleteFilesError::MissingFileUrls)?;

    let service = FileCleanupService::new(state.service_context());
    let summary = service
        .delete_files_by_urls(&request.file_urls)
        .await
        .map_err(DeleteFilesError::Failed)?;

    Ok(Json(DeleteFilesResponse::from(summary)))
}
