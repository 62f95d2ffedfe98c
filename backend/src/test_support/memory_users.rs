//! `UserRepository` over a mutex-guarded map keyed by email.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserAccount};

/// Accounts kept in memory; emails are unique like the database constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<String, UserAccount>>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, UserAccount>> {
        self.accounts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut accounts = self.lock();
        let key = user.email.as_ref().to_owned();
        if accounts.contains_key(&key) {
            return Err(UserPersistenceError::duplicate_email(key));
        }
        let stored = User {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        };
        accounts.insert(
            key,
            UserAccount {
                user: stored.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(stored)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.lock().get(email.as_ref()).cloned())
    }
}
