use axum::{extract::State, http::StatusCode};
use tracing::{info, instrument, warn};

use crate::{error::AppError, state::AppState};

/// Wipes every user. Tokens and posts cascade. Only `PLATFORM=dev` may call it.
#[instrument(skip(state))]
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if !state.config.is_dev() {
        warn!(platform = %state.config.platform, "reset refused outside dev");
        return Err(AppError::Forbidden);
    }
    let removed = state.users.delete_all().await?;
    info!(removed, "all users deleted");
    Ok(StatusCode::OK)
}
