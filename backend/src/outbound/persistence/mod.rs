//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain types and map
//! driver failures onto the port error enums. Row structs and the table
//! definitions stay private to this module.
//!
//! ```ignore
//! use marketplace::outbound::persistence::{DbPool, DieselVehicleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/marketplace")).await?;
//! let vehicles = DieselVehicleRepository::new(pool);
//! ```

mod diesel_user_repository;
mod diesel_vehicle_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vehicle_repository::DieselVehicleRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
