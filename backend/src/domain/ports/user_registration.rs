//! Driving port for account registration.
use async_trait::async_trait;

use crate::domain::{Error, RegistrationDetails, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Create an account and return its public view.
    async fn register(&self, details: &RegistrationDetails) -> Result<User, Error>;
}
