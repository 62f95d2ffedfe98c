//! Shared helpers for backend integration tests.
//!
//! Each suite compiles as its own crate, so not every helper is used by every
//! suite.
#![allow(dead_code, reason = "helpers are shared across suites")]

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{TestDatabase, provision_database};
