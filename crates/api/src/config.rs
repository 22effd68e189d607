//! Process configuration, read once at startup.

use std::str::FromStr;

use linkup_core::presence::PRESENCE_STALE_TIMEOUT_SECS;

use crate::auth::jwt::JwtConfig;

/// Everything the server needs from the environment.
///
/// | Env Var                 | Default                 |
/// |-------------------------|-------------------------|
/// | `HOST`                  | `0.0.0.0`               |
/// | `PORT`                  | `5000`                  |
/// | `CORS_ORIGINS`          | `http://localhost:3000` |
/// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
/// | `PRESENCE_TIMEOUT_SECS` | `120`                   |
///
/// JWT settings are documented on [`JwtConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in the environment.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Heartbeats older than this read as offline.
    pub presence_timeout_secs: i64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Panics on a value that is present but unparsable.
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:3000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        ServerConfig {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 5000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            presence_timeout_secs: env_or("PRESENCE_TIMEOUT_SECS", PRESENCE_STALE_TIMEOUT_SECS),
            jwt: JwtConfig::from_env(),
        }
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
