use std::sync::Arc;

use sqlx::PgPool;
use time::Duration;

use crate::auth::{
    jwt::JwtKeys,
    refresh::RefreshTokenService,
    repo::{PgRefreshTokenStore, PgUserStore, UserStore},
};
use crate::config::AppConfig;
use crate::posts::repo::{PgPostStore, PostStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub jwt: Arc<JwtKeys>,
    pub refresh: RefreshTokenService,
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(db: PgPool, config: Arc<AppConfig>) -> Self {
        let refresh = RefreshTokenService::new(
            Arc::new(PgRefreshTokenStore::new(db.clone())),
            Duration::days(config.jwt.refresh_ttl_days),
        );
        Self {
            jwt: Arc::new(JwtKeys::from_config(&config.jwt)),
            refresh,
            users: Arc::new(PgUserStore::new(db.clone())),
            posts: Arc::new(PgPostStore::new(db)),
            config,
        }
    }
}
