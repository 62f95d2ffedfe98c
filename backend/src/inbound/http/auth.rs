//! Bearer token extractors.
//!
//! [`BearerClaims`] gates a handler on a verified token: no usable
//! `Authorization` header yields 401, a token that fails verification yields
//! 403. The verified claims are also stored in the request extensions.
//! [`WriteAccess`] applies the same gate to create and edit only when
//! [`BearerAuth::require_for_writes`] is set.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{Error, TokenClaims, UserId};

use super::state::BearerAuth;

pub const MISSING_TOKEN_MESSAGE: &str = "token not provided";
pub const INVALID_TOKEN_MESSAGE: &str = "invalid or expired token";
pub const NO_IDENTITY_MESSAGE: &str = "token carries no user identity";

const BEARER_PREFIX: &str = "Bearer ";

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized(MISSING_TOKEN_MESSAGE))?;
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::unauthorized(MISSING_TOKEN_MESSAGE))
}

fn map_token_error(error: TokenError) -> Error {
    debug!(%error, "bearer token verification failed");
    match error {
        TokenError::Expired | TokenError::Invalid { .. } => Error::forbidden(INVALID_TOKEN_MESSAGE),
        TokenError::Encoding { message } => Error::internal(message),
    }
}

fn bearer_auth(req: &HttpRequest) -> Result<&BearerAuth, Error> {
    req.app_data::<web::Data<BearerAuth>>()
        .map(|data| data.get_ref())
        .ok_or_else(|| Error::internal("bearer authentication is not configured"))
}

fn authenticate(req: &HttpRequest, auth: &BearerAuth) -> Result<TokenClaims, Error> {
    let token = bearer_token(req)?;
    let claims = auth.verifier().verify(token).map_err(map_token_error)?;
    req.extensions_mut().insert(claims.clone());
    Ok(claims)
}

/// Claims of a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerClaims(pub TokenClaims);

impl BearerClaims {
    /// The requesting user, or 403 when the token names nobody.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.0
            .user_id
            .ok_or_else(|| Error::forbidden(NO_IDENTITY_MESSAGE))
    }
}

impl FromRequest for BearerClaims {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = bearer_auth(req).and_then(|auth| authenticate(req, auth));
        ready(claims.map(Self))
    }
}

/// Permission to create or edit listings.
///
/// Holds the verified claims when writes require a token, `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteAccess(pub Option<TokenClaims>);

impl FromRequest for WriteAccess {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = bearer_auth(req).and_then(|auth| {
            if auth.require_for_writes() {
                authenticate(req, auth).map(|claims| Self(Some(claims)))
            } else {
                Ok(Self(None))
            }
        });
        ready(result)
    }
}
