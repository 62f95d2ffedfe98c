//! Driven ports for signing and checking bearer tokens.
use crate::domain::{AccessToken, TokenClaims};

use super::define_port_error;

define_port_error! {
    /// Token signing and verification failures.
    pub enum TokenError {
        /// Signing failed.
        Encoding { message: String } => "token could not be signed: {message}",
        /// The token is malformed or its signature does not match.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token was valid once but its expiry has passed.
        Expired => "token has expired",
    }
}

/// Produces signed tokens at login.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, claims: &TokenClaims) -> Result<AccessToken, TokenError>;
}

/// Checks tokens presented on protected routes.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
