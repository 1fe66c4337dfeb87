use std::{env, env::VarError, str::FromStr, time::Duration};

use sqlx::sqlite::SqliteConnectOptions;

use crate::errors::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub query_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let database_url = lookup("DATABASE_URL").map_err(|e| {
            AppError::Config(format!("DATABASE_URL environment variable not set: {}", e))
        })?;
        if !database_url.starts_with("sqlite:") {
            return Err(AppError::Config(
                "DATABASE_URL must be a sqlite: connection string".to_owned(),
            ));
        }
        SqliteConnectOptions::from_str(&database_url)
            .map_err(|e| AppError::Config(format!("DATABASE_URL is malformed: {}", e)))?;

        let host = optional(&lookup, "HOST")?.unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(AppError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".to_owned(),
            ));
        }
        let timeout_secs = parse_or(&lookup, "QUERY_TIMEOUT_SECS", DEFAULT_QUERY_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "QUERY_TIMEOUT_SECS must be at least 1".to_owned(),
            ));
        }

        Ok(Config {
            database_url,
            host,
            port,
            max_connections,
            query_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn optional<F>(lookup: &F, key: &str) -> Result<Option<String>, AppError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(AppError::EnvVarError(e)),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(lookup, key)? {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} is malformed: {}", key, e))),
        None => Ok(default),
    }
}
