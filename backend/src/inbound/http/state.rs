//! Shared HTTP adapter state.
//!
//! Handlers receive these bundles through `actix_web::web::Data`, so they
//! depend only on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, TokenVerifier, UserRegistration, VehicleCommand, VehicleQuery,
};

/// Ports behind the auth service routes.
#[derive(Clone)]
pub struct AuthHttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub login: Arc<dyn LoginService>,
}

impl AuthHttpState {
    pub fn new(registration: Arc<dyn UserRegistration>, login: Arc<dyn LoginService>) -> Self {
        Self {
            registration,
            login,
        }
    }
}

/// Ports behind the vehicle service routes.
#[derive(Clone)]
pub struct VehicleHttpState {
    pub commands: Arc<dyn VehicleCommand>,
    pub queries: Arc<dyn VehicleQuery>,
}

impl VehicleHttpState {
    pub fn new(commands: Arc<dyn VehicleCommand>, queries: Arc<dyn VehicleQuery>) -> Self {
        Self { commands, queries }
    }
}

/// Token verification settings read by the bearer extractors.
#[derive(Clone)]
pub struct BearerAuth {
    verifier: Arc<dyn TokenVerifier>,
    require_for_writes: bool,
}

impl BearerAuth {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            verifier,
            require_for_writes: false,
        }
    }

    /// Also demand a bearer token on create and edit.
    #[must_use]
    pub fn requiring_auth_for_writes(mut self, required: bool) -> Self {
        self.require_for_writes = required;
        self
    }

    pub fn verifier(&self) -> &dyn TokenVerifier {
        self.verifier.as_ref()
    }

    pub fn require_for_writes(&self) -> bool {
        self.require_for_writes
    }
}
