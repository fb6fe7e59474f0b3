//! Integration test utilities for the presence server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API over a real TCP listener.

pub mod helpers;
pub mod fixtures;

pub use helpers::*;
pub use fixtures::*;
