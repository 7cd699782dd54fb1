//! MusicBrainz API Client
//!
//! Searches the MusicBrainz recording index and decodes the candidates.
//!
//! ## API Endpoints
//!
//! - **Recording search**:
//!   `https://musicbrainz.org/ws/2/recording?query={query}&fmt=json&inc=artists+releases+isrcs`
//!
//! ## Rate Limiting
//!
//! MusicBrainz allows identified clients 1 request/second. The client admits
//! the first request immediately and spaces every later request at least the
//! configured interval after the previous admission (burst of 1). Waiting for
//! admission honours the caller's [`CancellationToken`].
//!
//! ## User Agent Requirement
//!
//! MusicBrainz requires all API clients to identify themselves with a proper User-Agent header:
//! Format: "ApplicationName/Version (ContactEmail)"
//!
//! ## Usage
//!
//! ```ignore
//! use core_metadata::providers::musicbrainz::MusicBrainzClient;
//! use core_runtime::config::HydrationConfig;
//!
//! let config = HydrationConfig::new("MyScrobbler/1.0 (contact@example.com)");
//! let client = MusicBrainzClient::new(http_client, &config)?;
//!
//! let token = CancellationToken::new();
//! let recordings = client
//!     .search_recordings(r#"recording:"Karma Police" AND artist:"Radiohead""#, &token)
//!     .await?;
//! ```

use crate::error::{MetadataError, Result};
use crate::providers::RecordingFetcher;
use async_trait::async_trait;
use bridge_traits::error::BridgeError;
use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use core_runtime::config::HydrationConfig;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Related entities requested alongside each recording
const RECORDING_INCLUDES: &str = "artists+releases+isrcs";

/// Enforces a minimum interval between admitted requests
struct RateLimiter {
    last_admitted: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_admitted: Mutex::new(None),
            min_interval,
        }
    }

    /// Waits until a request may be sent, or fails if `cancel` fires first.
    ///
    /// A cancelled waiter does not consume a slot.
    async fn acquire(&self, cancel: &CancellationToken) -> Result<()> {
        let mut last_admitted = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(MetadataError::Interrupted { stage: "waiting for rate limiter" });
            }
            guard = self.last_admitted.lock() => guard,
        };

        if let Some(last) = *last_admitted {
            let ready_at = last + self.min_interval;
            if ready_at > Instant::now() {
                debug!(
                    wait_ms = (ready_at - Instant::now()).as_millis() as u64,
                    "Rate limiting: waiting for next slot"
                );
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        return Err(MetadataError::Interrupted { stage: "waiting for rate limiter" });
                    }
                    _ = tokio::time::sleep_until(ready_at) => {}
                }
            }
        }

        *last_admitted = Some(Instant::now());
        Ok(())
    }
}

/// Artist referenced by a credit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CreditedArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sort_name: String,
}

/// One entry of a recording's artist credit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtistCredit {
    /// Name as credited on this recording
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub joinphrase: String,
    pub artist: CreditedArtist,
}

impl ArtistCredit {
    /// Credited name, falling back to the artist's own name
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.artist.name
        } else {
            &self.name
        }
    }
}

/// A published edition of a recording
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: String,
    /// `YYYY-MM-DD`, `YYYY-MM`, `YYYY` or empty
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub disambiguation: String,
    #[serde(default)]
    pub track_count: u32,
}

/// Candidate recording returned by a search
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Recording {
    pub id: String,
    pub title: String,
    /// Length in milliseconds
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(default)]
    pub isrcs: Vec<String>,
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
    #[serde(default)]
    pub releases: Vec<Release>,
}

/// MusicBrainz recording search response
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingSearchResponse {
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

/// MusicBrainz API client
///
/// Rate-limited fetcher for recording searches. Every call makes at most one
/// HTTP request; nothing is retried.
pub struct MusicBrainzClient {
    http_client: Arc<dyn HttpClient>,
    api_base_url: String,
    user_agent: String,
    request_timeout: Duration,
    rate_limiter: RateLimiter,
}

impl MusicBrainzClient {
    /// Creates a new MusicBrainz API client
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::Config` if the configuration does not validate.
    pub fn new(http_client: Arc<dyn HttpClient>, config: &HydrationConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            http_client,
            api_base_url: config.api_base_url.clone(),
            user_agent: config.user_agent.clone(),
            request_timeout: config.request_timeout,
            rate_limiter: RateLimiter::new(config.rate_limit_interval()),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/recording?query={}&fmt=json&inc={}",
            self.api_base_url,
            urlencoding::encode(query),
            RECORDING_INCLUDES
        )
    }

    async fn execute(&self, url: &str, cancel: &CancellationToken) -> Result<HttpResponse> {
        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .timeout(self.request_timeout);

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(MetadataError::Interrupted { stage: "waiting for MusicBrainz response" });
            }
            outcome = tokio::time::timeout(self.request_timeout, self.http_client.execute(request)) => outcome,
        };

        let response = match outcome {
            Err(_) | Ok(Err(BridgeError::Timeout(_))) => {
                warn!(url = %url, timeout_ms = self.request_timeout.as_millis() as u64, "MusicBrainz request timed out");
                return Err(MetadataError::Timeout {
                    url: url.to_string(),
                    timeout: self.request_timeout,
                });
            }
            Ok(Err(source)) => {
                return Err(MetadataError::Network {
                    url: url.to_string(),
                    source,
                });
            }
            Ok(Ok(response)) => response,
        };

        if !response.is_success() {
            warn!(status = response.status, url = %url, "MusicBrainz returned non-success status");
            return Err(MetadataError::UpstreamStatus {
                status: response.status,
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl RecordingFetcher for MusicBrainzClient {
    async fn search_recordings(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recording>> {
        let url = self.search_url(query);

        self.rate_limiter.acquire(cancel).await?;

        debug!(url = %url, "Searching MusicBrainz recordings");
        let response = self.execute(&url, cancel).await?;

        let response: RecordingSearchResponse =
            serde_json::from_slice(&response.body).map_err(|source| MetadataError::Decode {
                url: url.clone(),
                source,
            })?;

        debug!(
            count = response.count,
            offset = response.offset,
            returned = response.recordings.len(),
            "MusicBrainz search completed"
        );

        Ok(response.recordings)
    }
}
