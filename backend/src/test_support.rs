//! In-memory port implementations for tests.
//!
//! Compiled for unit tests and, through the `test-support` feature, for the
//! integration suites under `backend/tests`. They honour the same contracts
//! as the Diesel adapters so HTTP flows can run without PostgreSQL.

mod clock;
mod memory_users;
mod memory_vehicles;
mod plaintext_hasher;

pub use clock::FixtureClock;
pub use memory_users::InMemoryUserRepository;
pub use memory_vehicles::InMemoryVehicleRepository;
pub use plaintext_hasher::PlaintextPasswordHasher;
