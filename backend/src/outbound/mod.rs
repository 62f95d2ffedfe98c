//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **security**: bcrypt password hashing and HS256 JWT signing
//!
//! Adapters only translate between domain types and infrastructure
//! representations.

pub mod persistence;
pub mod security;
