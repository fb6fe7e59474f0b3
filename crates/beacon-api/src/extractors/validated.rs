//! JSON body extractors that run `validator` rules after decoding

use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

fn body_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.body_text()),
        JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.body_text()),
        JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.body_text()),
        other => ApiError::invalid_body(other.body_text()),
    }
}

fn decode<T>(bytes: &Bytes) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate,
{
    let Json(value) = Json::<T>::from_bytes(bytes).map_err(body_rejection)?;
    value.validate()?;
    Ok(value)
}

/// Validated JSON extractor
///
/// Requires a JSON content type, then decodes and validates the body.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(body_rejection)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Body that may be left out entirely
///
/// An empty or whitespace-only body yields `None`; anything else must be
/// valid JSON for `T`. The content type is not checked.
#[derive(Debug, Clone)]
pub struct OptionalValidatedJson<T>(pub Option<T>);

#[async_trait]
impl<S, T> FromRequest<S> for OptionalValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }
        decode(&bytes).map(|value| Self(Some(value)))
    }
}
