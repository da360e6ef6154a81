use std::{env, time::Duration};

use thiserror::Error;

use coursehub_core::connection::RetryPolicy;

use crate::service::ServiceSettings;

/// Variables that must be set for the process to start.
pub const REQUIRED_VARS: [&str; 4] = ["STORE_URI", "STORE_DB_NAME", "CACHE_URI", "PORT"];

/// Collection holding course documents inside the store database.
const COURSES_COLLECTION: &str = "courses";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The following environment variables are missing: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Store connection URI (`STORE_URI`, required)
    pub store_uri: String,
    /// Store database name (`STORE_DB_NAME`, required)
    pub store_db_name: String,
    /// Cache connection URI (`CACHE_URI`, required)
    pub cache_uri: String,
    /// Port to listen on (`PORT`, required)
    pub port: u16,
    /// Cache TTL in seconds for created courses (default: 3600)
    pub cache_ttl_seconds: u64,
    /// Maximum number of in-memory cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Serve `GET /api/courses/{id}` from the cache when possible (default: false)
    pub cache_reads: bool,
    /// Connection retries after the first attempt (default: 5)
    pub connect_retries: u32,
    /// Fixed delay between connection attempts in milliseconds (default: 5,000)
    pub connect_retry_delay_ms: u64,
    /// Upper bound for one connection attempt in milliseconds (default: 5,000)
    pub connect_timeout_ms: u64,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required: `STORE_URI`, `STORE_DB_NAME`, `CACHE_URI`, `PORT`.
    ///
    /// Optional:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 3600)
    /// - `CACHE_MAX_ENTRIES` - Maximum in-memory cache entries (default: 10,000)
    /// - `CACHE_READS` - Consult the cache on single-course reads (default: false)
    /// - `CONNECT_RETRIES` - Connection retries (default: 5)
    /// - `CONNECT_RETRY_DELAY_MS` - Delay between attempts (default: 5,000)
    /// - `CONNECT_TIMEOUT_MS` - Timeout per attempt (default: 5,000)
    /// - `REQUEST_TIMEOUT_SECONDS` - HTTP request timeout (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as missing. Every missing required variable is
    /// reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| get(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let port_raw = get("PORT").unwrap_or_default();
        let port: u16 = port_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name: "PORT",
            value: port_raw.clone(),
        })?;

        let parse_or = |name: &str, default: u64| -> u64 {
            get(name)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Ok(Self {
            store_uri: get("STORE_URI").unwrap_or_default(),
            store_db_name: get("STORE_DB_NAME").unwrap_or_default(),
            cache_uri: get("CACHE_URI").unwrap_or_default(),
            port,
            cache_ttl_seconds: parse_or("CACHE_TTL_SECONDS", 3600),
            cache_max_entries: get("CACHE_MAX_ENTRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(10_000),
            cache_reads: get("CACHE_READS")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            connect_retries: get("CONNECT_RETRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(5),
            connect_retry_delay_ms: parse_or("CONNECT_RETRY_DELAY_MS", 5_000),
            connect_timeout_ms: parse_or("CONNECT_TIMEOUT_MS", 5_000),
            request_timeout_seconds: parse_or("REQUEST_TIMEOUT_SECONDS", 10),
        })
    }

    /// Namespace of the course collection, `{db}.courses`.
    pub fn collection(&self) -> String {
        format!("{}.{}", self.store_db_name, COURSES_COLLECTION)
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(
            self.connect_retries,
            Duration::from_millis(self.connect_retry_delay_ms),
        )
        .with_attempt_timeout(Duration::from_millis(self.connect_timeout_ms))
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            cache_ttl: self.cache_ttl(),
            cache_reads: self.cache_reads,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
