//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::cache::DEFAULT_MAX_SIZE;
use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache holds after any `set`
    pub max_size: usize,
    /// TTL applied when a caller does not pass one explicitly
    pub default_ttl: Duration,
    /// TTL for the `page:` namespace
    pub page_ttl: Duration,
    /// TTL for the `api:` namespace
    pub api_ttl: Duration,
    /// TTL for `route:` preload markers
    pub route_ttl: Duration,
    /// Interval of the optional background expiry sweep, None = lazy expiry only
    pub sweep_interval: Option<Duration>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_DEFAULT_TTL_SECS` - Default TTL in seconds (default: 300)
    /// - `CACHE_PAGE_TTL_SECS` - Page cache TTL in seconds (default: 600)
    /// - `CACHE_API_TTL_SECS` - API response cache TTL in seconds (default: 300)
    /// - `CACHE_ROUTE_TTL_SECS` - Route preload marker TTL in seconds (default: 1800)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Sweep interval in seconds, 0 or unset disables it
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_size: env_parse("CACHE_MAX_SIZE").unwrap_or(defaults.max_size),
            default_ttl: env_secs("CACHE_DEFAULT_TTL_SECS").unwrap_or(defaults.default_ttl),
            page_ttl: env_secs("CACHE_PAGE_TTL_SECS").unwrap_or(defaults.page_ttl),
            api_ttl: env_secs("CACHE_API_TTL_SECS").unwrap_or(defaults.api_ttl),
            route_ttl: env_secs("CACHE_ROUTE_TTL_SECS").unwrap_or(defaults.route_ttl),
            sweep_interval: env_secs("CACHE_SWEEP_INTERVAL_SECS").filter(|d| !d.is_zero()),
        }
    }

    // == Validate ==
    /// Rejects configurations under which the capacity or expiry rules cannot hold.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be greater than zero".to_string(),
            ));
        }

        let ttls = [
            ("default_ttl", self.default_ttl),
            ("page_ttl", self.page_ttl),
            ("api_ttl", self.api_ttl),
            ("route_ttl", self.route_ttl),
        ];
        if let Some((name, _)) = ttls.iter().find(|(_, ttl)| ttl.is_zero()) {
            return Err(CacheError::InvalidConfig(format!(
                "{} must be a positive duration",
                name
            )));
        }

        if self.sweep_interval.is_some_and(|d| d.is_zero()) {
            return Err(CacheError::InvalidConfig(
                "sweep_interval must be a positive duration".to_string(),
            ));
        }

        Ok(())
    }

    /// Capacity as a non-zero count, available once `validate` has passed.
    pub(crate) fn capacity(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.max_size).ok_or_else(|| {
            CacheError::InvalidConfig("max_size must be greater than zero".to_string())
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE.get(),
            default_ttl: Duration::from_secs(5 * 60),
            page_ttl: Duration::from_secs(10 * 60),
            api_ttl: Duration::from_secs(5 * 60),
            route_ttl: Duration::from_secs(30 * 60),
            sweep_interval: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_secs(name: &str) -> Option<Duration> {
    env_parse::<u64>(name).map(Duration::from_secs)
}
