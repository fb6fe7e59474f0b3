//! Store traits (ports) implemented by the infrastructure crates

mod object_store;
mod repositories;

pub use object_store::ObjectStore;
pub use repositories::{PresenceRepository, RepoResult};
