use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::TrustedCaller, error::AppError, extract::AppJson, state::AppState,
};

pub const USER_UPGRADED: &str = "user.upgraded";

#[derive(Debug, Deserialize)]
pub struct PolkaEvent {
    pub event: String,
    #[serde(default)]
    pub data: PolkaEventData,
}

#[derive(Debug, Default, Deserialize)]
pub struct PolkaEventData {
    pub user_id: Option<String>,
}

/// Payment provider callback. Events other than `user.upgraded` are
/// acknowledged and dropped.
#[instrument(skip_all)]
pub async fn polka(
    State(state): State<AppState>,
    _caller: TrustedCaller,
    AppJson(payload): AppJson<PolkaEvent>,
) -> Result<StatusCode, AppError> {
    if payload.event != USER_UPGRADED {
        debug!(event = %payload.event, "webhook event ignored");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = payload
        .data
        .user_id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or(AppError::MalformedInput("invalid user id"))?;

    state
        .users
        .upgrade_to_red(user_id)
        .await?
        .ok_or(AppError::NotFound)?;
    info!(user_id = %user_id, "user upgraded to chirpy red");
    Ok(StatusCode::NO_CONTENT)
}
