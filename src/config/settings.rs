//! Runtime settings read from the environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/catalog";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub max_connections: u32,
    pub bcrypt_cost: u32,
    pub body_limit_bytes: usize,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let token_ttl_secs = parse_or(get("TOKEN_TTL_SECS"), "TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)?;

        Ok(Settings {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            bcrypt_cost: parse_or(get("BCRYPT_COST"), "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            body_limit_bytes: parse_or(get("BODY_LIMIT_BYTES"), "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
