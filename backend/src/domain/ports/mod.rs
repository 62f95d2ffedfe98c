//! Ports at the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `UserRegistration`, `VehicleCommand`,
//! `VehicleQuery`) are what inbound adapters call. Driven ports
//! (`UserRepository`, `VehicleRepository`, `PasswordHasher`, `TokenIssuer`,
//! `TokenVerifier`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod password_hasher;
mod token_codec;
mod user_registration;
mod user_repository;
mod vehicle_command;
mod vehicle_query;
mod vehicle_repository;

pub use login_service::LoginService;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use token_codec::{TokenError, TokenIssuer, TokenVerifier};
pub use user_registration::UserRegistration;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use vehicle_command::VehicleCommand;
pub use vehicle_query::VehicleQuery;
pub use vehicle_repository::{VehicleRepository, VehicleRepositoryError};

#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use token_codec::{MockTokenIssuer, MockTokenVerifier};
#[cfg(test)]
pub use user_registration::MockUserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use vehicle_command::MockVehicleCommand;
#[cfg(test)]
pub use vehicle_query::MockVehicleQuery;
#[cfg(test)]
pub use vehicle_repository::MockVehicleRepository;
