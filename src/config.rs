//! Typed configuration assembled once at process start.
//!
//! Required values are read from the environment (§6.3); missing values
//! fail fast with [`Error::ConfigMissing`] before any connection is
//! attempted. Optional pool-tuning values take the defaults in
//! [`PoolConfig::default`].

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Postgres connection parameters consumed by [`crate::store::Store`].
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl DbConfig {
    /// Load from `POSTGRES_HOST` / `POSTGRES_PORT` / `POSTGRES_DB` /
    /// `POSTGRES_USER` / `POSTGRES_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: require_env("POSTGRES_HOST")?,
            port: require_env("POSTGRES_PORT")?
                .parse()
                .map_err(|_| Error::ConfigMissing("POSTGRES_PORT is not a valid port".into()))?,
            database: require_env("POSTGRES_DB")?,
            user: require_env("POSTGRES_USER")?,
            password: require_env("POSTGRES_PASSWORD")?,
        })
    }

    /// Render as a `postgres://` connection URL.
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// Connection pool tuning (§4.1, §5).
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub idle_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 20,
            idle_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(2),
        }
    }
}

/// Process-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub pool: PoolConfig,
    /// Identifies the admin for message-deletion overrides (§6.3).
    pub admin_public_key: String,
    /// Address the WebSocket accept loop binds to (ambient, not in §6.3).
    pub listen_addr: String,
}

impl Config {
    /// Assemble configuration from the environment, failing fast on any
    /// missing required value. `listen_addr` falls back to
    /// `0.0.0.0:8080` when `LISTEN_ADDR` is unset.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            db: DbConfig::from_env()?,
            pool: PoolConfig::default(),
            admin_public_key: require_env("ADMIN_PUBLIC_KEY")?,
            listen_addr: env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| Error::ConfigMissing(key.to_string()))
}
