use std::collections::HashSet;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::claims::Claims;
use crate::{config::JwtConfig, state::AppState};

/// Reasons an access token was refused. Callers only ever see "unauthorized";
/// the variants exist for logs.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signature or structure invalid: {0}")]
    Malformed(#[source] jsonwebtoken::errors::Error),

    #[error("unexpected issuer")]
    InvalidIssuer,

    #[error("token expired")]
    Expired,

    #[error("subject is not a user id")]
    MalformedSubject,

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// HS256 codec for stateless access tokens.
///
/// Built once from config and shared; two instances with the same secret and
/// issuer accept exactly the same tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    pub access_ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.as_ref().clone()
    }
}

impl JwtKeys {
    pub fn new(secret: &[u8], issuer: impl Into<String>, access_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            access_ttl,
        }
    }

    pub fn from_config(cfg: &JwtConfig) -> Self {
        Self::new(
            cfg.secret.as_bytes(),
            cfg.issuer.clone(),
            Duration::minutes(cfg.ttl_minutes),
        )
    }

    pub fn sign_access(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue(user_id, self.access_ttl)
    }

    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, TokenError> {
        self.issue_at(user_id, ttl, OffsetDateTime::now_utc())
    }

    pub fn issue_at(
        &self,
        user_id: Uuid,
        ttl: Duration,
        now: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let iat = now.unix_timestamp();
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user_id.to_string(),
            iat,
            exp: (now + ttl).unix_timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)?;
        debug!(user_id = %user_id, exp = claims.exp, "jwt signed");
        Ok(token)
    }

    pub fn validate(&self, token: &str) -> Result<Uuid, TokenError> {
        self.validate_at(token, OffsetDateTime::now_utc())
    }

    /// Checks signature, then issuer, then `exp > now`, then the subject.
    pub fn validate_at(&self, token: &str, now: OffsetDateTime) -> Result<Uuid, TokenError> {
        // Expiry is checked below against the caller's clock, without leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims =
            HashSet::from(["exp".to_string(), "iss".to_string(), "sub".to_string()]);

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(TokenError::Malformed)?
            .claims;

        if claims.iss != self.issuer {
            return Err(TokenError::InvalidIssuer);
        }
        if claims.exp <= now.unix_timestamp() {
            return Err(TokenError::Expired);
        }
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::MalformedSubject)?;

        debug!(user_id = %user_id, "jwt verified");
        Ok(user_id)
    }
}
