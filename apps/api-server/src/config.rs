//! Server configuration.

use std::env;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Database URL.
    pub database_url: String,
    /// Shared secret for verifying identity-provider tokens.
    pub jwt_secret: String,
    /// Expected issuer of identity-provider tokens.
    pub token_issuer: String,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret = env::var("PLAZA_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("PLAZA_JWT_SECRET is required"))?;

        Ok(Self {
            host: env::var("PLAZA_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PLAZA_SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:plaza.db?mode=rwc".to_string()),
            jwt_secret,
            token_issuer: env::var("PLAZA_TOKEN_ISSUER")
                .unwrap_or_else(|_| auth::DEFAULT_TOKEN_ISSUER.to_string()),
            log_level: env::var("PLAZA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns the server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
