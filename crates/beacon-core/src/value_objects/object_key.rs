//! Object keys resolved from public locators

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-layer key of one remote object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Resolve a public locator (usually a URL) to an object key.
    ///
    /// Query string and fragment are ignored and the last non-empty path
    /// segment is the key, so `https://cdn.example/f/abc123?x=1` resolves to
    /// `abc123`. A bare key resolves to itself. Returns `None` when nothing
    /// usable remains.
    pub fn from_locator(locator: &str) -> Option<Self> {
        let trimmed = locator.trim();
        let without_fragment = trimmed.split('#').next().unwrap_or_default();
        let path = without_fragment.split('?').next().unwrap_or_default();

        // Drop the scheme and authority so a bare host never becomes a key
        let path = match path.split_once("://") {
            Some((_, rest)) => rest.split_once('/').map_or("", |(_, p)| p),
            None => path,
        };

        path.rsplit('/')
            .find(|segment| !segment.is_empty())
            .map(|segment| Self(segment.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
