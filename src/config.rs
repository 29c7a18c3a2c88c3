use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    /// Shared secret presented by the payment provider's webhook.
    pub polka_key: String,
    /// `dev` unlocks the admin reset endpoint.
    pub platform: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "chirpy".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_days: std::env::var("REFRESH_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let polka_key = std::env::var("POLKA_KEY")?;
        let platform = std::env::var("PLATFORM").unwrap_or_else(|_| "prod".into());
        Ok(Self {
            database_url,
            jwt,
            polka_key,
            platform,
        })
    }

    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}
