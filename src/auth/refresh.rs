use std::sync::Arc;

use rand::{rngs::OsRng, RngCore};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::{debug, error};
use uuid::Uuid;

use crate::auth::repo::RefreshTokenStore;
use crate::db::RepoError;

/// Bytes of OS randomness per token. Hex encoding doubles the length.
const REFRESH_TOKEN_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum RefreshError {
    /// Unknown, revoked and expired tokens all look like this.
    #[error("refresh token not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Lifecycle rules for opaque, server-tracked refresh tokens.
#[derive(Clone)]
pub struct RefreshTokenService {
    store: Arc<dyn RefreshTokenStore>,
    ttl: Duration,
}

impl std::fmt::Debug for RefreshTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshTokenService")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl RefreshTokenService {
    pub fn new(store: Arc<dyn RefreshTokenStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Mints and stores a token for `user_id`. The raw value is returned here
    /// and nowhere else.
    pub async fn issue(&self, user_id: Uuid) -> Result<String, RefreshError> {
        self.issue_at(user_id, OffsetDateTime::now_utc()).await
    }

    pub async fn issue_at(
        &self,
        user_id: Uuid,
        now: OffsetDateTime,
    ) -> Result<String, RefreshError> {
        let token = generate_refresh_token();
        let expires_at = now + self.ttl;

        self.store
            .insert(&token, user_id, expires_at)
            .await
            .map_err(|e| {
                error!(user_id = %user_id, error = %e, "failed to insert refresh token");
                RefreshError::Store(e)
            })?;

        debug!(user_id = %user_id, expires_at = %expires_at, "issued refresh token");
        Ok(token)
    }

    /// Owner of a usable token. Read-only: the stored expiry is never touched.
    pub async fn redeem(&self, token: &str) -> Result<Uuid, RefreshError> {
        self.redeem_at(token, OffsetDateTime::now_utc()).await
    }

    pub async fn redeem_at(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<Uuid, RefreshError> {
        match self.store.find_active(token, now).await? {
            Some(user_id) => {
                debug!(user_id = %user_id, "refresh token redeemed");
                Ok(user_id)
            }
            None => {
                debug!("refresh token not found or inactive");
                Err(RefreshError::NotFound)
            }
        }
    }

    /// Idempotent. Unknown or already revoked tokens are not an error.
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshError> {
        self.revoke_at(token, OffsetDateTime::now_utc()).await
    }

    pub async fn revoke_at(&self, token: &str, now: OffsetDateTime) -> Result<(), RefreshError> {
        let touched = self.store.revoke(token, now).await.map_err(|e| {
            error!(error = %e, "failed to revoke refresh token");
            RefreshError::Store(e)
        })?;
        debug!(touched, "refresh token revoke");
        Ok(())
    }
}

fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
