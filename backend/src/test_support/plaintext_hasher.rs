//! Reversible stand-in for bcrypt so flow tests stay fast.

use async_trait::async_trait;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const PREFIX: &str = "plain$";

/// Stores `plain$<password>`. Never use outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextPasswordHasher;

#[async_trait]
impl PasswordHasher for PlaintextPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("{PREFIX}{password}")))
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        hash.as_str()
            .strip_prefix(PREFIX)
            .map(|stored| stored == password)
            .ok_or_else(|| PasswordHashError::malformed("missing plaintext prefix"))
    }
}
