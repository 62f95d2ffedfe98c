//! Driving port for login.
//!
//! Inbound adapters call this to exchange credentials for a bearer token
//! without importing any hashing or signing infrastructure, which keeps
//! handler tests free of I/O.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and issue a token for the matching account.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;
}
