//! Client configuration.
//!
//! Use the builder methods to customize, or [`Config::from_env`] to read
//! `SEIUN_*` environment variables.
//!
//! ```ignore
//! use seiun::config::Config;
//!
//! let config = Config::default()
//!     .with_service_host("bsky.social")
//!     .with_page_limit(25);
//! ```

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

/// Default service provider.
pub const DEFAULT_SERVICE_HOST: &str = "bsky.social";

/// Default page size; the XRPC list endpoints accept 1..=100.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

const MAX_PAGE_LIMIT: u32 = 100;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Host used for login/registration when none is given explicitly
    pub service_host: String,
    /// Items requested per page
    pub page_limit: u32,
    /// Upper bound on each network operation
    pub request_timeout: Duration,
    /// Where sessions and credentials are persisted
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_host: DEFAULT_SERVICE_HOST.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service_host(mut self, host: impl Into<String>) -> Self {
        self.service_host = host.into();
        self
    }

    /// Set the page size, clamped to 1..=100.
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.clamp(1, MAX_PAGE_LIMIT);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Build a config from `SEIUN_SERVICE_HOST`, `SEIUN_PAGE_LIMIT`,
    /// `SEIUN_TIMEOUT_SECS` and `SEIUN_DATA_DIR`. Unparseable numbers fall
    /// back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("SEIUN_SERVICE_HOST") {
            if !host.trim().is_empty() {
                config = config.with_service_host(host.trim());
            }
        }

        if let Ok(raw) = std::env::var("SEIUN_PAGE_LIMIT") {
            match raw.parse::<u32>() {
                Ok(limit) => config = config.with_page_limit(limit),
                Err(e) => warn!("Ignoring SEIUN_PAGE_LIMIT={:?}: {}", raw, e),
            }
        }

        if let Ok(raw) = std::env::var("SEIUN_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    config = config.with_request_timeout(Duration::from_secs(secs))
                }
                Ok(_) => warn!("Ignoring SEIUN_TIMEOUT_SECS=0"),
                Err(e) => warn!("Ignoring SEIUN_TIMEOUT_SECS={:?}: {}", raw, e),
            }
        }

        if let Ok(dir) = std::env::var("SEIUN_DATA_DIR") {
            if !dir.is_empty() {
                config = config.with_data_dir(dir);
            }
        }

        config
    }
}
