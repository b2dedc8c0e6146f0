use std::env;

use chrono::TimeDelta;

const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: TimeDelta,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3001);
        let token_ttl = match env::var("TOKEN_TTL_HOURS") {
            Ok(raw) => parse_token_ttl(&raw)?,
            Err(_) => TimeDelta::hours(DEFAULT_TOKEN_TTL_HOURS),
        };
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            token_ttl,
        })
    }
}

/// Positive whole hours that fit a `TimeDelta`.
fn parse_token_ttl(raw: &str) -> anyhow::Result<TimeDelta> {
    let hours: i64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("TOKEN_TTL_HOURS must be a whole number, got {raw:?}"))?;
    if hours <= 0 {
        anyhow::bail!("TOKEN_TTL_HOURS must be positive, got {hours}");
    }
    TimeDelta::try_hours(hours)
        .ok_or_else(|| anyhow::anyhow!("TOKEN_TTL_HOURS is out of range: {hours}"))
}
