//! # Hydration Configuration
//!
//! Settings for the MusicBrainz lookup path: where to send requests, how the
//! client identifies itself, how fast it may go, and how long results stay
//! cached.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::HydrationConfig;
//! use std::time::Duration;
//!
//! let config = HydrationConfig::new("MyScrobbler/1.2 (ops@example.com)")
//!     .with_cache_ttl(Duration::from_secs(30 * 60))
//!     .with_request_timeout(Duration::from_secs(5));
//!
//! config.validate()?;
//! ```
//!
//! ## Error Handling
//!
//! [`HydrationConfig::validate`] rejects values the MusicBrainz terms of
//! service or the lookup path cannot work with:
//!
//! ```
//! use core_runtime::config::HydrationConfig;
//!
//! let config = HydrationConfig::new("no-contact-info").with_rate_limit_interval_ms(0);
//! assert!(config.validate().is_err());
//! ```

use crate::error::{Error, Result};
use std::time::Duration;

/// MusicBrainz web service root
pub const DEFAULT_API_BASE_URL: &str = "https://musicbrainz.org/ws/2";

/// Client identifier sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!(
    "track-hydration/",
    env!("CARGO_PKG_VERSION"),
    " ( https://musicbrainz.org/doc/MusicBrainz_API/Rate_Limiting )"
);

/// MusicBrainz allows one request per second for identified clients
pub const DEFAULT_RATE_LIMIT_INTERVAL_MS: u64 = 1000;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

const MAX_RATE_LIMIT_INTERVAL_MS: u64 = 60_000;

/// Configuration for the MusicBrainz hydration service.
///
/// # Example
///
/// ```
/// use core_runtime::config::HydrationConfig;
/// use std::time::Duration;
///
/// let config = HydrationConfig::default()
///     .with_user_agent("MyScrobbler/1.2 (ops@example.com)")
///     .with_cache_ttl(Duration::from_secs(600));
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.rate_limit_interval(), Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationConfig {
    /// Root of the web service, without trailing slash
    pub api_base_url: String,

    /// Stable client identifier sent as `User-Agent`
    ///
    /// MusicBrainz requires a user agent that identifies your application.
    /// Format: "ApplicationName/Version (Contact)"
    /// See: https://musicbrainz.org/doc/MusicBrainz_API/Rate_Limiting
    pub user_agent: String,

    /// Minimum delay between two outbound requests, in milliseconds
    pub rate_limit_interval_ms: u64,

    /// Deadline for a single request, independent of caller cancellation
    pub request_timeout: Duration,

    /// How long a successful search result is served from the cache
    pub cache_ttl: Duration,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rate_limit_interval_ms: DEFAULT_RATE_LIMIT_INTERVAL_MS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl HydrationConfig {
    /// Creates a configuration with defaults and the given client identifier
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self::default().with_user_agent(user_agent)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_rate_limit_interval_ms(mut self, interval_ms: u64) -> Self {
        self.rate_limit_interval_ms = interval_ms;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn rate_limit_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit_interval_ms)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "API base URL must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }

        let ua = self.user_agent.trim();
        if ua.is_empty() {
            return Err(Error::Config("User agent cannot be empty".to_string()));
        }
        if !ua.contains('/') || !ua.contains('(') || !ua.contains(')') {
            return Err(Error::Config(
                "User agent must follow format: 'AppName/Version (Contact)'".to_string(),
            ));
        }

        if self.rate_limit_interval_ms == 0 {
            return Err(Error::Config(
                "Rate limit interval must be greater than 0ms".to_string(),
            ));
        }
        if self.rate_limit_interval_ms > MAX_RATE_LIMIT_INTERVAL_MS {
            return Err(Error::Config(
                "Rate limit interval exceeds maximum of 60 seconds (60,000ms)".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        if self.cache_ttl.is_zero() {
            return Err(Error::Config(
                "Cache TTL must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
