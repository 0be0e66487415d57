//! Run configuration
//!
//! Every input comes from environment-style key/value pairs, validated once
//! at process start. A validation failure aborts the run before any network
//! activity happens.
//!
//! The lookup is injected as a closure so validation can be tested against
//! plain maps instead of mutating the process environment.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Trading pair symbol, e.g. `BTCUSDT`
pub const ENV_SYMBOL: &str = "SYMBOL";

/// Candle interval identifier, e.g. `1m` or `1h` (opaque to this crate)
pub const ENV_INTERVAL: &str = "INTERVAL";

/// Page size for each upstream request
pub const ENV_LIMIT: &str = "LIMIT";

/// Delay between consecutive page requests, in milliseconds
pub const ENV_REQ_DELAY_MS: &str = "REQ_DELAY_MS";

/// ISO-8601 UTC datetime the fetch starts from
pub const ENV_START_DATE: &str = "START_DATE";

/// Destination CSV path, relative to the working directory
pub const ENV_OUTPUT_FILE: &str = "OUTPUT_FILE";

/// Optional override for the upstream host (used by tests)
pub const ENV_BASE_URL: &str = "BASE_URL";

/// Largest page size the upstream accepts
pub const MAX_PAGE_LIMIT: u32 = 1000;

/// Default upstream host
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Validated configuration for one fetch run
#[derive(Debug, Clone)]
pub struct Config {
    /// Trading pair symbol
    pub symbol: String,
    /// Candle interval identifier
    pub interval: String,
    /// Page size, 1..=[`MAX_PAGE_LIMIT`]
    pub limit: u32,
    /// Delay between consecutive page requests
    pub request_delay: Duration,
    /// First instant to fetch from
    pub start_time: DateTime<Utc>,
    /// Destination CSV path
    pub output_file: PathBuf,
    /// Upstream host, without a trailing slash
    pub base_url: String,
}

impl Config {
    /// Load and validate configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load and validate configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let symbol = require_non_empty(&lookup, ENV_SYMBOL)?;
        let interval = require_non_empty(&lookup, ENV_INTERVAL)?;

        let limit = parse_positive(&lookup, ENV_LIMIT)?;
        let limit = u32::try_from(limit)
            .ok()
            .filter(|l| *l <= MAX_PAGE_LIMIT)
            .ok_or_else(|| {
                Error::invalid_env(ENV_LIMIT, format!("must be at most {MAX_PAGE_LIMIT}"))
            })?;

        let delay_ms = parse_positive(&lookup, ENV_REQ_DELAY_MS)?;

        let start_raw = require_non_empty(&lookup, ENV_START_DATE)?;
        let start_time = DateTime::parse_from_rfc3339(&start_raw)
            .map_err(|e| {
                Error::invalid_env(ENV_START_DATE, format!("not an ISO-8601 datetime: {e}"))
            })?
            .with_timezone(&Utc);

        let output_file = PathBuf::from(require_non_empty(&lookup, ENV_OUTPUT_FILE)?);

        let base_url = match lookup(ENV_BASE_URL) {
            Some(raw) if !raw.trim().is_empty() => {
                let trimmed = raw.trim();
                Url::parse(trimmed)
                    .map_err(|e| Error::invalid_env(ENV_BASE_URL, e.to_string()))?;
                trimmed.trim_end_matches('/').to_string()
            }
            _ => DEFAULT_BASE_URL.to_string(),
        };

        Ok(Self {
            symbol,
            interval,
            limit,
            request_delay: Duration::from_millis(delay_ms),
            start_time,
            output_file,
            base_url,
        })
    }

    /// Start instant as epoch milliseconds, the unit the upstream cursor uses
    pub fn start_time_ms(&self) -> i64 {
        self.start_time.timestamp_millis()
    }
}

fn require_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        Some(_) => Err(Error::invalid_env(key, "must not be empty")),
        None => Err(Error::missing_env(key)),
    }
}

fn parse_positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<u64> {
    let raw = require_non_empty(lookup, key)?;
    let value: u64 = raw
        .parse()
        .map_err(|_| Error::invalid_env(key, format!("not a positive integer: {raw}")))?;
    if value == 0 {
        return Err(Error::invalid_env(key, "must be positive"));
    }
    Ok(value)
}
