//! Registration and login use-cases.
//!
//! Composes the user repository, the password hasher and the token issuer
//! behind the `UserRegistration` and `LoginService` driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{
    LoginService, PasswordHashError, PasswordHasher, TokenIssuer, UserPersistenceError,
    UserRegistration, UserRepository,
};
use crate::domain::{
    AccessToken, Error, LoginCredentials, NewUser, RegistrationDetails, TokenClaims, User, UserId,
};

/// Message returned when an email is already registered.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "a user with this email already exists";

/// Domain service behind the auth endpoints.
#[derive(Clone)]
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    issuer: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, H, T> AccountService<U, H, T> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, issuer: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            issuer,
            clock,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(DUPLICATE_EMAIL_MESSAGE),
        UserPersistenceError::Connection { message } => {
            error!(%message, "user store unavailable");
            Error::service_unavailable("user store unavailable")
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user store query failed");
            Error::internal(message)
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    error!(%error, "password hashing failed");
    Error::internal(error.to_string())
}

#[async_trait]
impl<U, H, T> UserRegistration for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn register(&self, details: &RegistrationDetails) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(map_hash_error)?;
        let new_user = NewUser {
            id: UserId::random(),
            name: details.name().clone(),
            email: details.email().clone(),
            password_hash,
        };
        let user = self.users.create(&new_user).await.map_err(map_user_error)?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

#[async_trait]
impl<U, H, T> LoginService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized("invalid password"));
        }

        let claims = TokenClaims::for_user(account.user.id, &account.user.email, self.clock.utc());
        self.issuer.issue(&claims).map_err(|err| {
            error!(error = %err, "token issuance failed");
            Error::internal("token issuance failed")
        })
    }
}

#[cfg(test)]
mod tests;
