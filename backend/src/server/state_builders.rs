//! Builders that wire the Diesel adapters and security adapters into the
//! HTTP state each service registers.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::{AccountService, VehicleService};
use crate::inbound::http::state::{AuthHttpState, BearerAuth, VehicleHttpState};
use crate::outbound::persistence::{DbPool, DieselUserRepository, DieselVehicleRepository};
use crate::outbound::security::{BcryptPasswordHasher, JwtTokenCodec};

use super::ServerSettings;

/// Registration and login backed by PostgreSQL, bcrypt and HS256 tokens.
#[must_use]
pub fn build_auth_state(pool: &DbPool, settings: &ServerSettings) -> AuthHttpState {
    let service = Arc::new(AccountService::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost)),
        Arc::new(JwtTokenCodec::new(settings.jwt_secret.as_bytes())),
        Arc::new(DefaultClock),
    ));
    AuthHttpState::new(service.clone(), service)
}

/// Listing commands and queries backed by PostgreSQL.
#[must_use]
pub fn build_vehicle_state(pool: &DbPool) -> VehicleHttpState {
    let service = Arc::new(VehicleService::new(
        Arc::new(DieselVehicleRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    ));
    VehicleHttpState::new(service.clone(), service)
}

/// Bearer verification with the shared signing secret.
#[must_use]
pub fn build_bearer_auth(settings: &ServerSettings) -> BearerAuth {
    BearerAuth::new(Arc::new(JwtTokenCodec::new(settings.jwt_secret.as_bytes())))
        .requiring_auth_for_writes(settings.require_auth_for_writes)
}
