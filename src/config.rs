//! Server configuration loaded from the environment

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;
use warp::http::Uri;

use crate::logging::LogFormat;
use crate::storage::{connection::DEFAULT_MAX_POOL_SIZE, DatabaseConfig, StoreError};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid DATABASE_URL: {0}")]
    Database(#[from] StoreError),
}

/// Everything `guestbook serve` needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database: DatabaseConfig,
    pub host: IpAddr,
    pub port: u16,
    /// Allowed CORS origin, normalized to `scheme://host[:port]`
    pub client_origin: String,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load from process environment. A `.env` file is read first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is not an error
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let pool_size = parse_or("DATABASE_POOL_SIZE", &lookup, DEFAULT_MAX_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_POOL_SIZE",
                value: "0".to_string(),
                reason: "pool size must be at least 1".to_string(),
            });
        }

        let database =
            DatabaseConfig::from_connection_string(database_url.trim())?.with_max_pool_size(pool_size);

        let client_url = lookup("CLIENT_URL").unwrap_or_else(|| DEFAULT_CLIENT_URL.to_string());

        Ok(Self {
            database,
            host: parse_or("HOST", &lookup, IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or("PORT", &lookup, DEFAULT_PORT)?,
            client_origin: normalize_origin(&client_url)?,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_format: parse_or("LOG_FORMAT", &lookup, LogFormat::default())?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(key: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

/// Reduce a client URL to the origin a browser sends, e.g. `http://localhost:5173`
pub fn normalize_origin(url: &str) -> Result<String, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key: "CLIENT_URL",
        value: url.to_string(),
        reason: reason.to_string(),
    };

    let uri: Uri = url.trim().parse().map_err(|_| invalid("not a valid URL"))?;

    let scheme = uri.scheme_str().ok_or_else(|| invalid("missing scheme"))?;
    if scheme != "http" && scheme != "https" {
        return Err(invalid("scheme must be http or https"));
    }

    let authority = uri.authority().ok_or_else(|| invalid("missing host"))?;
    if authority.as_str().contains('@') {
        return Err(invalid("origin must not contain credentials"));
    }

    if !matches!(uri.path(), "" | "/") || uri.query().is_some() {
        return Err(invalid("origin must not contain a path or query"));
    }

    Ok(format!("{}://{}", scheme, authority))
}
