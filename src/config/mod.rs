// src/config/mod.rs

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::error::{CounterError, Result};

/// Environment variable naming the store host. Required; there is no default.
pub const REDIS_HOST_VAR: &str = "REDIS_HOST";
pub const REDIS_PORT_VAR: &str = "REDIS_PORT";
pub const COUNTER_KEY_VAR: &str = "COUNTER_KEY";
pub const DEBUG_VAR: &str = "HIT_COUNTER_DEBUG";

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Build the configuration from defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load a JSON configuration file. Missing fields fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Override fields with any of the recognised environment variables that are set.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| env::var(name).ok())
    }

    fn apply_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(REDIS_HOST_VAR) {
            self.store.host = host;
        }

        if let Some(port) = lookup(REDIS_PORT_VAR) {
            self.store.port = port.trim().parse().map_err(|_| {
                CounterError::Config(format!("{} must be a port number, got {:?}", REDIS_PORT_VAR, port))
            })?;
        }

        if let Some(key) = lookup(COUNTER_KEY_VAR) {
            self.store.key = key;
        }

        if let Some(flag) = lookup(DEBUG_VAR) {
            self.server.debug = parse_flag(&flag);
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.key.is_empty() {
            return Err(CounterError::Config("counter key must not be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Configuration for the Redis counter store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store host name or address. Empty when `REDIS_HOST` is unset.
    #[serde(default)]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Name of the counter incremented on every request
    #[serde(default = "default_key")]
    pub key: String,

    /// Upper bound on establishing a connection
    #[serde(default = "default_conn_timeout", with = "duration_serde")]
    pub connection_timeout: Duration,

    /// Upper bound on a single command round-trip
    #[serde(default = "default_response_timeout", with = "duration_serde")]
    pub response_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            key: default_key(),
            connection_timeout: default_conn_timeout(),
            response_timeout: default_response_timeout(),
        }
    }
}

fn default_port() -> u16 {
    6379
}

fn default_key() -> String {
    "hits".to_string()
}

fn default_conn_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_response_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Retry policy for store connection failures.
///
/// The delay between attempts is fixed; it never grows and carries no jitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts permitted after the first failure
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Pause before each retry
    #[serde(default = "default_retry_delay", with = "duration_serde")]
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay: default_retry_delay(),
        }
    }
}

fn default_max_retries() -> usize {
    5
}

fn default_retry_delay() -> Duration {
    Duration::from_millis(500)
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_http_port")]
    pub port: u16,

    /// Development diagnostics: verbose logs and error text in 500 bodies
    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_http_port(),
            debug: false,
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    5000
}

// Helper module to serialize/deserialize Duration with serde
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
