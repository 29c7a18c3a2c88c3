use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::{guard, jwt::JwtKeys};
use crate::{error::AppError, state::AppState};

const BEARER_PREFIX: &str = "Bearer ";

/// Header carrying the shared secret of trusted webhook callers.
pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, Error)]
#[error("missing credential")]
pub struct MissingCredential;

/// Token after the case-sensitive `Bearer ` scheme, trimmed.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, MissingCredential> {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            debug!("missing Authorization header");
            MissingCredential
        })?;

    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| {
            debug!("Authorization header without Bearer scheme");
            MissingCredential
        })?
        .trim();

    if token.is_empty() {
        debug!("empty bearer token");
        return Err(MissingCredential);
    }
    Ok(token)
}

/// Raw value of the webhook API key header, trimmed.
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, MissingCredential> {
    let key = headers
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    if key.is_empty() {
        debug!("missing {} header", API_KEY_HEADER);
        return Err(MissingCredential);
    }
    Ok(key)
}

/// Authenticated user id taken from a Bearer access token.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        guard::authenticate(&parts.headers, &keys).map(AuthUser)
    }
}

/// Caller holding the webhook API key. Extracted from headers only, so it
/// rejects before any body is read.
pub struct TrustedCaller;

#[async_trait]
impl FromRequestParts<AppState> for TrustedCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        guard::authenticate_api_key(&parts.headers, &state.config.polka_key)?;
        Ok(TrustedCaller)
    }
}
