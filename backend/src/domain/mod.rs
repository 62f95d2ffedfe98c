//! Domain primitives, services and ports.
//!
//! Nothing in here knows about HTTP or SQL. Inbound adapters build the
//! validated inputs from request payloads, call a driving port, and map the
//! returned [`Error`] to a response; outbound adapters implement the driven
//! ports in [`ports`].

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod token;
pub mod trace_id;
pub mod user;
pub mod vehicle;
pub mod vehicle_service;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, RegistrationDetails, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::token::{AccessToken, TOKEN_TTL_SECONDS, TokenClaims, token_ttl};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, PasswordHash, User, UserAccount, UserId, UserName, UserValidationError,
};
pub use self::vehicle::{
    AlreadySold, UnknownVehicleStatus, Vehicle, VehicleChanges, VehicleDraft, VehicleId,
    VehicleStatus, VehicleValidationError,
};
pub use self::vehicle_service::VehicleService;
