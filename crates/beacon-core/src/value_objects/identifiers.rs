//! Workspace and user identifiers
//!
//! Both are opaque strings owned by the external data layer. Existence is not
//! checked here, only shape: non-blank, bounded length, no control characters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a workspace identifier
pub const MAX_WORKSPACE_ID_LEN: usize = 128;
/// Maximum length of a user name
pub const MAX_USER_NAME_LEN: usize = 64;
/// Path segments that share a position with the user name in presence routes
pub const RESERVED_USER_NAMES: [&str; 2] = ["active", "cleanup"];

/// Error when an identifier has an invalid shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },

    #[error("{kind} must be at most {max} characters")]
    TooLong { kind: &'static str, max: usize },

    #[error("{kind} contains a control character")]
    ControlCharacter { kind: &'static str },

    #[error("{kind} '{value}' is reserved")]
    Reserved { kind: &'static str, value: String },
}

fn check(kind: &'static str, value: &str, max: usize) -> Result<(), IdentifierError> {
    if value.trim().is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if value.chars().count() > max {
        return Err(IdentifierError::TooLong { kind, max });
    }
    if value.chars().any(char::is_control) {
        return Err(IdentifierError::ControlCharacter { kind });
    }
    Ok(())
}

/// Opaque identifier of a workspace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Parse and validate a workspace identifier
    pub fn parse(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        check("workspace_id", &value, MAX_WORKSPACE_ID_LEN)?;
        Ok(Self(value))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WorkspaceId {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<WorkspaceId> for String {
    fn from(id: WorkspaceId) -> Self {
        id.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User name, unique within one workspace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Parse and validate a user name
    pub fn parse(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        check("user_name", &value, MAX_USER_NAME_LEN)?;
        if RESERVED_USER_NAMES.contains(&value.as_str()) {
            return Err(IdentifierError::Reserved {
                kind: "user_name",
                value,
            });
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
