use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub mod admin;
pub mod health;
pub mod webhooks;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/healthz", get(health::healthz))
        .route("/api/polka/webhooks", post(webhooks::polka))
        .route("/admin/reset", post(admin::reset))
}
