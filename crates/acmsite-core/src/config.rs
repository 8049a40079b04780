//! Application configuration management.
//!
//! Configuration comes from the process environment (after the binary has
//! loaded any `.env` file). Every setting except `CONTENT_URL` has a default.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const CONTENT_URL: &str = "CONTENT_URL";
pub const CACHE_TTL_MS: &str = "CACHE_TTL_MS";
pub const FALLBACK_ENABLED: &str = "FALLBACK_ENABLED";
pub const FALLBACK_PATH: &str = "FALLBACK_PATH";
pub const FETCH_TIMEOUT_MS: &str = "FETCH_TIMEOUT_MS";
pub const PORT: &str = "PORT";
pub const BIND_ADDR: &str = "BIND_ADDR";
pub const LOG_DIR: &str = "LOG_DIR";

/// Freshness window when `CACHE_TTL_MS` is unset.
/// Five minutes keeps edits to the hosted document visible quickly without
/// fetching on every page view.
const DEFAULT_CACHE_TTL_MS: u64 = 5 * 60 * 1000;

/// Upper bound on one remote fetch when `FETCH_TIMEOUT_MS` is unset.
const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub content_url: String,
    pub cache_ttl: Duration,
    pub fallback_enabled: bool,
    pub fallback_path: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub port: u16,
    pub bind_addr: IpAddr,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let content_url = get(CONTENT_URL).ok_or(ConfigError::Missing(CONTENT_URL))?;
        if !(content_url.starts_with("http://") || content_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: CONTENT_URL,
                value: content_url,
                reason: "expected an http(s) URL".to_string(),
            });
        }

        let cache_ttl = match get(CACHE_TTL_MS) {
            Some(v) => Duration::from_millis(parse_number(CACHE_TTL_MS, &v)?),
            None => Duration::from_millis(DEFAULT_CACHE_TTL_MS),
        };

        let fetch_timeout = match get(FETCH_TIMEOUT_MS) {
            Some(v) => {
                let ms = parse_number(FETCH_TIMEOUT_MS, &v)?;
                if ms == 0 {
                    return Err(ConfigError::Invalid {
                        var: FETCH_TIMEOUT_MS,
                        value: v,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
        };

        let fallback_enabled = match get(FALLBACK_ENABLED) {
            Some(v) => parse_bool(FALLBACK_ENABLED, &v)?,
            None => true,
        };

        let port = match get(PORT) {
            Some(v) => v.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: PORT,
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let bind_addr = match get(BIND_ADDR) {
            Some(v) => v.parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
                var: BIND_ADDR,
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        Ok(Self {
            content_url,
            cache_ttl,
            fallback_enabled,
            fallback_path: get(FALLBACK_PATH).map(PathBuf::from),
            fetch_timeout,
            port,
            bind_addr,
            log_dir: get(LOG_DIR).map(PathBuf::from),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|e| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
