use tracing::info;
use uuid::Uuid;

use super::repo_types::Post;
use crate::{error::AppError, state::AppState};

pub const MAX_POST_LEN: usize = 140;

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Masks whole profane words. Words are split on single spaces, so
/// `Sharbert!` survives while `SHARBERT` does not.
pub(crate) fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                "****"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn validate_body(body: &str) -> Result<(), AppError> {
    if body.trim().is_empty() {
        return Err(AppError::MalformedInput("post body is required"));
    }
    if body.chars().count() > MAX_POST_LEN {
        return Err(AppError::MalformedInput("post is too long"));
    }
    Ok(())
}

pub async fn create_post(state: &AppState, user_id: Uuid, body: &str) -> Result<Post, AppError> {
    validate_body(body)?;
    let post = state.posts.create(user_id, &clean_body(body)).await?;
    info!(post_id = %post.id, user_id = %user_id, "post created");
    Ok(post)
}

/// Existence is checked before ownership: a missing post is 404 for everyone.
pub async fn delete_post(state: &AppState, user_id: Uuid, post_id: Uuid) -> Result<(), AppError> {
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or(AppError::NotFound)?;
    crate::auth::guard::authorize_owner(user_id, post.user_id)?;
    state.posts.delete(post.id).await?;
    info!(post_id = %post_id, user_id = %user_id, "post deleted");
    Ok(())
}
