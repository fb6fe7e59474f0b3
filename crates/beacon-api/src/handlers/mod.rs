//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod files;
pub mod health;
pub mod presence;
