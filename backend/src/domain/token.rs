//! Bearer tokens issued at login and checked by the vehicle service.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::{EmailAddress, UserId};

/// Lifetime of an issued token, in seconds.
pub const TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Lifetime of an issued token.
#[must_use]
pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECONDS)
}

/// Signed token string handed to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Identity asserted by a verified token.
///
/// `user_id` is optional because a token signed with the shared secret by
/// some other issuer may omit it; the buy operation refuses such tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: Option<UserId>,
    pub email: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Claims for a freshly authenticated user, valid for [`token_ttl`].
    #[must_use]
    pub fn for_user(user_id: UserId, email: &EmailAddress, now: DateTime<Utc>) -> Self {
        Self {
            user_id: Some(user_id),
            email: Some(email.to_string()),
            issued_at: now,
            expires_at: now + token_ttl(),
        }
    }
}
