use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{CreatePostRequest, ListPostsQuery, PostResponse},
    services,
};
use crate::{auth::extractors::AuthUser, error::AppError, extract::AppJson, state::AppState};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/:id", get(get_post).delete(delete_post))
}

fn parse_id(raw: &str, what: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::MalformedInput(what))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let post = services::create_post(&state, user_id, &payload.body).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(q): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let author = q
        .author_id
        .as_deref()
        .map(|raw| parse_id(raw, "invalid author id"))
        .transpose()?;
    let posts = state.posts.list(author, q.sort).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let id = parse_id(&id, "invalid post id")?;
    let post = state.posts.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(post.into()))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "invalid post id")?;
    services::delete_post(&state, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
