use serde::Deserialize;

use acme_store_shared::constants::{
    DB_MAX_CONNECTIONS, DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES, MIN_JWT_SECRET_LEN,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    pub cors_origins: String,
    pub database_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default(
                "access_token_expire_minutes",
                DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
            )?
            .set_default("cors_origins", "http://localhost:3000,http://localhost:80")?
            .set_default("database_max_connections", i64::from(DB_MAX_CONNECTIONS))?
            .add_source(config::Environment::default())
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;

        // Tokens are HS256 signed; a short secret defeats the point.
        if app_config.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(config::ConfigError::Message(format!(
                "JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters"
            )));
        }

        Ok(app_config)
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        parse_origins(&self.cors_origins)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
