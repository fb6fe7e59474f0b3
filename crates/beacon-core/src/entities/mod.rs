//! Domain entities - core business objects

mod deletion;
mod presence;

pub use deletion::{DeletionAttempt, DeletionFailure, DeletionSummary};
pub use presence::{PresenceRecord, PresenceStatus};
