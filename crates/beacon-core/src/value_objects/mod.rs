//! Value objects - immutable types that represent domain concepts

mod identifiers;
mod liveness;
mod object_key;

pub use identifiers::{
    IdentifierError, UserName, WorkspaceId, MAX_USER_NAME_LEN, MAX_WORKSPACE_ID_LEN, RESERVED_USER_NAMES,
};
pub use liveness::{
    is_active, is_stale, now_millis, LivenessPolicy, DEFAULT_INACTIVITY_THRESHOLD,
    DEFAULT_LIVENESS_WINDOW, MAX_INACTIVITY_THRESHOLD, MAX_LIVENESS_WINDOW,
};
pub(crate) use liveness::age_millis;
pub use object_key::ObjectKey;
