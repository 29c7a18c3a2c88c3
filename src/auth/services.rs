use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use super::{
    dto::LoginResponse,
    password::{hash_password, verify_dummy, verify_password},
    repo_types::User,
};
use crate::{error::AppError, state::AppState};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validated email plus Argon2 hash, ready to store.
pub(crate) fn prepare_credentials(
    email: &str,
    password: &str,
) -> Result<(String, String), AppError> {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(AppError::MalformedInput("invalid email"));
    }
    if password.is_empty() {
        return Err(AppError::MalformedInput("password is required"));
    }
    let hash = hash_password(password)?;
    Ok((email, hash))
}

pub async fn register(state: &AppState, email: &str, password: &str) -> Result<User, AppError> {
    let (email, hash) = prepare_credentials(email, password)?;
    let user = state.users.create(&email, &hash).await.map_err(|e| {
        warn!(email = %email, error = %e, "create user failed");
        AppError::from(e)
    })?;
    info!(user_id = %user.id, "user registered");
    Ok(user)
}

/// Unknown email and wrong password both end in `Unauthorized` after the
/// same amount of hashing work.
pub async fn login(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<LoginResponse, AppError> {
    let email = normalize_email(email);

    let Some(user) = state.users.find_by_email(&email).await? else {
        verify_dummy(password);
        warn!("login unknown email");
        return Err(AppError::Unauthorized);
    };

    if !verify_password(password, &user.hashed_password)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized);
    }

    let token = state.jwt.sign_access(user.id)?;
    let refresh_token = state.refresh.issue(user.id).await?;

    info!(user_id = %user.id, "user logged in");
    Ok(LoginResponse {
        user: user.into(),
        token,
        refresh_token,
    })
}
