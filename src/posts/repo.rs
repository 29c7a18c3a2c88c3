use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Post, SortOrder};
use crate::db::RepoResult;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, user_id: Uuid, body: &str) -> RepoResult<Post>;
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>>;
    /// All posts, or only `author`'s, ordered by creation time.
    async fn list(&self, author: Option<Uuid>, order: SortOrder) -> RepoResult<Vec<Post>>;
    async fn delete(&self, id: Uuid) -> RepoResult<u64>;
}

#[derive(Clone)]
pub struct PgPostStore {
    db: PgPool,
}

impl PgPostStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, user_id: Uuid, body: &str) -> RepoResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, body, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, created_at, updated_at, body, user_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, created_at, updated_at, body, user_id
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(post)
    }

    async fn list(&self, author: Option<Uuid>, order: SortOrder) -> RepoResult<Vec<Post>> {
        let sql = match order {
            SortOrder::Asc => {
                r#"
                SELECT id, created_at, updated_at, body, user_id
                FROM posts
                WHERE $1::uuid IS NULL OR user_id = $1
                ORDER BY created_at ASC
                "#
            }
            SortOrder::Desc => {
                r#"
                SELECT id, created_at, updated_at, body, user_id
                FROM posts
                WHERE $1::uuid IS NULL OR user_id = $1
                ORDER BY created_at DESC
                "#
            }
        };
        let rows = sqlx::query_as::<_, Post>(sql)
            .bind(author)
            .fetch_all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<u64> {
        let done = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(done.rows_affected())
    }
}
