//! Server configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_DB_CONNECT_ATTEMPTS: u32 = 30;
pub const DB_CONNECT_RETRY_INTERVAL: Duration = Duration::from_secs(1);
pub const COIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub const CMC_API_KEY_VAR: &str = "X-CMC_PRO_API_KEY";
pub const CMC_BASE_URL_VAR: &str = "CMC_BASE_URL";
pub const CMC_QUOTES_PATH_VAR: &str = "CMC_LATEST_QUOTES_PATH";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} required")]
    Missing { var: &'static str },
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_connect_attempts: u32,
    pub coin: CoinSettings,
}

/// CoinMarketCap proxy settings. Each value is optional at startup; the coin
/// route reports whichever is missing per request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub quotes_path: Option<String>,
}

impl CoinSettings {
    /// Read `X-CMC_PRO_API_KEY`, `CMC_BASE_URL` and `CMC_LATEST_QUOTES_PATH`.
    /// Empty values count as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: env_non_empty(CMC_API_KEY_VAR),
            base_url: env_non_empty(CMC_BASE_URL_VAR),
            quotes_path: env_non_empty(CMC_QUOTES_PATH_VAR),
        }
    }
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT`: default 8000
    /// - `DB_MAX_CONNECTIONS`: default 5
    /// - `DB_CONNECT_ATTEMPTS`: default 30, one second apart
    /// - CoinMarketCap settings, see [`CoinSettings::from_env`]
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or `PORT` is not a port
    /// number. The pool settings fall back to their defaults when malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing { var: "DATABASE_URL" })?;
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;

        Ok(Self {
            database_url,
            port,
            db_max_connections: env_parse_u32("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            db_connect_attempts: env_parse_u32("DB_CONNECT_ATTEMPTS", DEFAULT_DB_CONNECT_ATTEMPTS).max(1),
            coin: CoinSettings::from_env(),
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid { var: "PORT", value: value.to_owned() }),
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_parse_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
