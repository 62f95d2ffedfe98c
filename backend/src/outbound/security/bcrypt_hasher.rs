//! `PasswordHasher` backed by bcrypt.
//!
//! bcrypt is deliberately slow, so both hashing and verification run on
//! Tokio's blocking pool. The plaintext copy moved into the blocking task is
//! wiped when the task finishes.

use async_trait::async_trait;
use tracing::{Instrument, debug_span};
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, TraceId};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// bcrypt adapter with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor.
    ///
    /// Values outside bcrypt's accepted range make every `hash` call fail;
    /// configuration validates the range before this is reached.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

async fn run_blocking<T, F>(label: &'static str, work: F) -> Result<T, PasswordHashError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
{
    let span = debug_span!(
        "password_hash",
        operation = label,
        trace_id = TraceId::current().map(|id| id.to_string())
    );
    tokio::task::spawn_blocking(move || span.in_scope(work))
        .in_current_span()
        .await
        .map_err(|err| PasswordHashError::hashing(format!("{label} task failed: {err}")))?
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let cost = self.cost;
        let plaintext = Zeroizing::new(password.to_owned());
        run_blocking("hash", move || {
            bcrypt::hash(plaintext.as_bytes(), cost)
                .map(PasswordHash::new)
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await
    }

    async fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
        let plaintext = Zeroizing::new(password.to_owned());
        let stored = hash.as_str().to_owned();
        run_blocking("verify", move || {
            bcrypt::verify(plaintext.as_bytes(), &stored)
                .map_err(|err| PasswordHashError::malformed(err.to_string()))
        })
        .await
    }
}
