//! # beacon-storage
//!
//! Remote object store adapters implementing `beacon_core::ObjectStore`:
//! an HTTP client for the hosted file API, a no-op store used when nothing is
//! configured, and [`ObjectStoreHandle`], which builds one of them on first use.

pub mod error;
pub mod handle;
pub mod http;
pub mod noop;

pub use error::{StorageError, StorageResult};
pub use handle::ObjectStoreHandle;
pub use http::HttpObjectStore;
pub use noop::NoopObjectStore;
