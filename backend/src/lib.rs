//! Marketplace backend: an auth service issuing bearer tokens and a vehicle
//! service that lists, edits and sells vehicles.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the types,
//! services and ports; [`inbound`] adapts HTTP onto the driving ports;
//! [`outbound`] implements the driven ports with Diesel, bcrypt and
//! `jsonwebtoken`; [`server`] wires everything for the two binaries.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Request tracing middleware shared by both services.
pub use middleware::Trace;
