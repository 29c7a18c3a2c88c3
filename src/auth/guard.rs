use axum::http::HeaderMap;
use sha2::{Digest, Sha256};
use tracing::warn;
use uuid::Uuid;

use super::{
    extractors::{extract_api_key, extract_bearer},
    jwt::JwtKeys,
};
use crate::error::AppError;

/// Bearer extraction followed by token validation. Every failure is the same
/// `Unauthorized`; the reason only goes to the log.
pub fn authenticate(headers: &HeaderMap, keys: &JwtKeys) -> Result<Uuid, AppError> {
    let token = extract_bearer(headers)?;
    keys.validate(token).map_err(|e| {
        warn!(error = %e, "access token rejected");
        AppError::Unauthorized
    })
}

/// Call only once the resource is known to exist, so a missing row stays a 404.
pub fn authorize_owner(user_id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
    if user_id == owner_id {
        Ok(())
    } else {
        warn!(user_id = %user_id, owner_id = %owner_id, "not the resource owner");
        Err(AppError::Forbidden)
    }
}

/// Trusted-caller check on the API-key header. Independent of any access
/// token; a missing or wrong key is `Unauthorized`.
pub fn authenticate_api_key(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let presented = extract_api_key(headers)?;
    if api_key_matches(presented, expected) {
        Ok(())
    } else {
        warn!("api key mismatch");
        Err(AppError::Unauthorized)
    }
}

/// Shared-secret check for webhook callers. Compares fixed-length digests so
/// the running time does not depend on the key.
pub fn api_key_matches(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}
