//! Axum extractors for request handling
//!
//! Custom extractors for path parameters, query strings, and validated bodies.
//! Rejections are reported through `ApiError` so every failure uses the same
//! error envelope.

mod path;
mod query;
mod validated;

pub use path::{PathParams, PresencePath, WorkspacePath};
pub use query::QueryParams;
pub use validated::{OptionalValidatedJson, ValidatedJson};
