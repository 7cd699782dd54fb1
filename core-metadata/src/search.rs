//! Recording lookup
//!
//! [`RecordingLookup`] sits in front of the MusicBrainz fetcher: it validates
//! and cleans the search terms, derives a fingerprint, serves unexpired cache
//! entries without touching the network, and otherwise fetches and caches.
//!
//! Concurrent misses for the same fingerprint share one fetch: the first
//! caller holds a per-fingerprint gate while it fetches, later callers wait on
//! the gate and then read the freshly cached result. Failures are never
//! cached, so a waiter that finds nothing after the gate opens fetches itself.

use crate::cache::SearchCache;
use crate::cleaner::MetadataCleaner;
use crate::error::{MetadataError, Result};
use crate::providers::{MusicBrainzClient, Recording, RecordingFetcher};
use bridge_traits::http::HttpClient;
use bridge_traits::time::Clock;
use core_runtime::config::HydrationConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Free-text search terms for a recording
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchParams {
    pub track: String,
    pub artist: String,
    pub release: String,
}

impl SearchParams {
    pub fn new(
        track: impl Into<String>,
        artist: impl Into<String>,
        release: impl Into<String>,
    ) -> Self {
        Self {
            track: track.into(),
            artist: artist.into(),
            release: release.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.track.is_empty() && self.artist.is_empty() && self.release.is_empty()
    }

    /// Cleans every field with the matching cleaner
    pub fn normalized(&self, cleaner: &dyn MetadataCleaner) -> Self {
        Self {
            track: cleaner.clean_recording(&self.track),
            artist: cleaner.clean_artist(&self.artist),
            release: cleaner.clean_recording(&self.release),
        }
    }

    /// Cache key for these parameters.
    ///
    /// Each field is query-component encoded, so separator characters inside
    /// values cannot shift field boundaries.
    pub fn fingerprint(&self) -> String {
        format!(
            "track={}&artist={}&release={}",
            urlencoding::encode(&self.track),
            urlencoding::encode(&self.artist),
            urlencoding::encode(&self.release)
        )
    }

    /// Lucene query matching each present field as an exact phrase
    pub fn to_query(&self) -> String {
        let fields = [
            ("recording", &self.track),
            ("artist", &self.artist),
            ("release", &self.release),
        ];

        fields
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(attribute, value)| format!("{}:\"{}\"", attribute, escape_phrase(value)))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// Escapes the characters that would terminate a quoted Lucene phrase
fn escape_phrase(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Cached, single-flight recording search
pub struct RecordingLookup {
    fetcher: Arc<dyn RecordingFetcher>,
    cleaner: Arc<dyn MetadataCleaner>,
    cache: SearchCache,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RecordingLookup {
    pub fn new(
        fetcher: Arc<dyn RecordingFetcher>,
        cleaner: Arc<dyn MetadataCleaner>,
        cache: SearchCache,
    ) -> Self {
        Self {
            fetcher,
            cleaner,
            cache,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Builds the MusicBrainz-backed lookup described by `config`
    pub fn from_config(
        http_client: Arc<dyn HttpClient>,
        cleaner: Arc<dyn MetadataCleaner>,
        clock: Arc<dyn Clock>,
        config: &HydrationConfig,
    ) -> Result<Self> {
        let fetcher = MusicBrainzClient::new(http_client, config)?;
        let cache = SearchCache::new(config.cache_ttl, clock);
        Ok(Self::new(Arc::new(fetcher), cleaner, cache))
    }

    pub fn cache(&self) -> &SearchCache {
        &self.cache
    }

    /// Searches for recordings matching `params`
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Recording>> {
        self.search_with_cancel(params, &CancellationToken::new())
            .await
    }

    /// Searches for recordings matching `params`, aborting when `cancel` fires
    ///
    /// # Errors
    ///
    /// - `MetadataError::InvalidInput` - every field is empty
    /// - any error of [`RecordingFetcher::search_recordings`], unchanged
    #[instrument(skip_all, fields(track = %params.track, artist = %params.artist))]
    pub async fn search_with_cancel(
        &self,
        params: &SearchParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recording>> {
        if params.is_empty() {
            return Err(MetadataError::InvalidInput);
        }

        let normalized = params.normalized(self.cleaner.as_ref());
        if normalized.is_empty() {
            return Err(MetadataError::InvalidInput);
        }

        let key = normalized.fingerprint();

        match self.cache.get(&key).await {
            Some(entry) if entry.is_fresh_at(self.cache.now()) => {
                debug!(key = %key, "Cache hit for MusicBrainz search");
                return Ok(entry.recordings);
            }
            Some(_) => debug!(key = %key, "Cache expired for MusicBrainz search"),
            None => debug!(key = %key, "Cache miss for MusicBrainz search"),
        }

        let gate = self.gate_for(&key).await;
        let result = self.fetch_through_gate(&gate, &key, &normalized, cancel).await;
        self.release_gate(&key, gate).await;
        result
    }

    async fn fetch_through_gate(
        &self,
        gate: &Mutex<()>,
        key: &str,
        params: &SearchParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recording>> {
        let _held = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(MetadataError::Interrupted { stage: "waiting for an in-flight search" });
            }
            held = gate.lock() => held,
        };

        // Another caller may have filled the slot while we waited
        if let Some(recordings) = self.cache.get_fresh(key).await {
            debug!(key = %key, "Cache filled by concurrent search");
            return Ok(recordings);
        }

        let query = params.to_query();
        let recordings = self.fetcher.search_recordings(&query, cancel).await?;

        self.cache.put(key, recordings.clone()).await;
        info!(
            key = %key,
            results = recordings.len(),
            ttl_secs = self.cache.ttl().as_secs(),
            "Cached MusicBrainz search result"
        );

        Ok(recordings)
    }

    async fn gate_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;
        Arc::clone(
            in_flight
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    async fn release_gate(&self, key: &str, gate: Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().await;
        // Only the map and this caller hold it: nobody else is waiting
        if Arc::strong_count(&gate) == 2 {
            in_flight.remove(key);
        }
    }

    #[cfg(test)]
    async fn in_flight_len(&self) -> usize {
        self.in_flight.lock().await.len()
    }
}
