use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::db::RepoResult;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, email: &str, hashed_password: &str) -> RepoResult<User>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    async fn update_credentials(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> RepoResult<Option<User>>;
    /// Sets the privilege flag. `None` when no such user exists.
    async fn upgrade_to_red(&self, id: Uuid) -> RepoResult<Option<User>>;
    /// Privileged bulk reset. Tokens and posts go with their users.
    async fn delete_all(&self) -> RepoResult<u64>;
}

/// Persistence for opaque refresh tokens.
///
/// Each method is one statement so that a cancelled request never leaves a
/// row half updated.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn insert(&self, token: &str, user_id: Uuid, expires_at: OffsetDateTime)
        -> RepoResult<()>;
    /// Owner of `token` if it is unrevoked and unexpired at `now`.
    async fn find_active(&self, token: &str, now: OffsetDateTime) -> RepoResult<Option<Uuid>>;
    /// Marks the token revoked if it is not already. Returns rows touched.
    async fn revoke(&self, token: &str, now: OffsetDateTime) -> RepoResult<u64>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, email: &str, hashed_password: &str) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, hashed_password)
            VALUES ($1, $2, $3)
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn update_credentials(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, hashed_password = $3, updated_at = now()
            WHERE id = $1
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(hashed_password)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn upgrade_to_red(&self, id: Uuid) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_chirpy_red = TRUE, updated_at = now()
            WHERE id = $1
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn delete_all(&self) -> RepoResult<u64> {
        let done = sqlx::query("DELETE FROM users").execute(&self.db).await?;
        Ok(done.rows_affected())
    }
}

#[derive(Clone)]
pub struct PgRefreshTokenStore {
    db: PgPool,
}

impl PgRefreshTokenStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: OffsetDateTime,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn find_active(&self, token: &str, now: OffsetDateTime) -> RepoResult<Option<Uuid>> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM refresh_tokens
            WHERE token = $1
                AND revoked_at IS NULL
                AND expires_at > $2
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.db)
        .await?;
        Ok(user_id)
    }

    async fn revoke(&self, token: &str, now: OffsetDateTime) -> RepoResult<u64> {
        let done = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $2, updated_at = $2
            WHERE token = $1
                AND revoked_at IS NULL
            "#,
        )
        .bind(token)
        .bind(now)
        .execute(&self.db)
        .await?;
        Ok(done.rows_affected())
    }
}
