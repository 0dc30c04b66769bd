use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Sessions live at most a year.
const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;
const TTL_EXPECTED: &str = "number of hours between 1 and 8760";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub session_ttl_hours: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://boilerplan.db".to_string());
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", "port number", 5000)?;
        let db_max_connections =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", "positive integer", 5)?;
        let acquire_secs =
            parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", "number of seconds", 10)?;
        let session_ttl_hours = parse_or(&lookup, "SESSION_TTL_HOURS", TTL_EXPECTED, 168)?;

        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                expected: "positive integer",
                value: "0".to_string(),
            });
        }
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(ConfigError::Invalid {
                key: "SESSION_TTL_HOURS",
                expected: TTL_EXPECTED,
                value: session_ttl_hours.to_string(),
            });
        }

        Ok(Self {
            database_url,
            host,
            port,
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
            session_ttl_hours,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            key: "HOST",
            expected: "IP address",
            value: self.host.clone(),
        })
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.session_ttl_hours)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
        None => Ok(default),
    }
}
