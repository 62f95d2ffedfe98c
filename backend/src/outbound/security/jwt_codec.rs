//! HS256 JSON Web Tokens for `TokenIssuer` and `TokenVerifier`.
//!
//! Both services share one secret. The payload keeps the wire names
//! `userId`, `email`, `iat` and `exp` so tokens stay interchangeable with
//! other clients signing against the same secret.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::ports::{TokenError, TokenIssuer, TokenVerifier};
use crate::domain::{AccessToken, TokenClaims, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    iat: i64,
    exp: i64,
}

impl From<&TokenClaims> for WireClaims {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.user_id.map(|id| id.to_string()),
            email: claims.email.clone(),
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
        }
    }
}

impl TryFrom<WireClaims> for TokenClaims {
    type Error = TokenError;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        let user_id = wire
            .user_id
            .map(|raw| UserId::new(&raw).map_err(|err| TokenError::invalid(err.to_string())))
            .transpose()?;
        let timestamp = |seconds: i64, name: &str| {
            DateTime::<Utc>::from_timestamp(seconds, 0)
                .ok_or_else(|| TokenError::invalid(format!("{name} is out of range")))
        };
        Ok(Self {
            user_id,
            email: wire.email,
            issued_at: timestamp(wire.iat, "iat")?,
            expires_at: timestamp(wire.exp, "exp")?,
        })
    }
}

/// Signs and checks HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl fmt::Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenCodec").finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtTokenCodec {
    fn issue(&self, claims: &TokenClaims) -> Result<AccessToken, TokenError> {
        encode(
            &Header::new(Algorithm::HS256),
            &WireClaims::from(claims),
            &self.encoding,
        )
        .map(AccessToken::new)
        .map_err(|err| TokenError::encoding(err.to_string()))
    }
}

impl TokenVerifier for JwtTokenCodec {
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data = decode::<WireClaims>(token, &self.decoding, &self.validation).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        TokenClaims::try_from(data.claims)
    }
}
