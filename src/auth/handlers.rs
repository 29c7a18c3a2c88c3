use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, RefreshResponse, RegisterRequest, UpdateUserRequest,
            UserResponse,
        },
        extractors::{extract_bearer, AuthUser},
        services,
    },
    error::AppError,
    extract::AppJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(register).put(update_user))
        .route("/api/login", post(login))
        .route("/api/refresh", post(refresh))
        .route("/api/revoke", post(revoke))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = services::register(&state, &payload.email, &payload.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let out = services::login(&state, &payload.email, &payload.password).await?;
    Ok(Json(out))
}

/// The refresh token travels as the Bearer credential.
#[instrument(skip(state, headers))]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, AppError> {
    let refresh_token = extract_bearer(&headers)?;
    let user_id = state.refresh.redeem(refresh_token).await?;
    let token = state.jwt.sign_access(user_id)?;
    info!(user_id = %user_id, "access token refreshed");
    Ok(Json(RefreshResponse { token }))
}

#[instrument(skip(state, headers))]
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let refresh_token = extract_bearer(&headers)?;
    state.refresh.revoke(refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let (email, hash) = services::prepare_credentials(&payload.email, &payload.password)?;
    let user = state
        .users
        .update_credentials(user_id, &email, &hash)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(user_id = %user.id, "user credentials updated");
    Ok(Json(user.into()))
}
