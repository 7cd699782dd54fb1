//! In-memory search result cache
//!
//! Maps a search fingerprint to the recordings MusicBrainz returned for it.
//! Entries expire lazily: an entry past its `expires_at` is still stored but
//! is never served as fresh. Nothing sweeps the map in the background;
//! [`SearchCache::purge_expired`] can be called by the host if memory matters.
//!
//! The map is unbounded. Every distinct fingerprint stays resident until it is
//! purged.

use crate::providers::Recording;
use bridge_traits::time::Clock;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Cached search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub recordings: Vec<Recording>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry may still be served at `now`
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Concurrent TTL cache for search results
///
/// Readers share a read lock; a writer replaces an entry wholesale under the
/// write lock, so readers see either the previous entry or the new one.
pub struct SearchCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SearchCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current time according to the cache's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns a copy of the stored entry, fresh or not
    pub async fn get(&self, fingerprint: &str) -> Option<CacheEntry> {
        self.entries.read().await.get(fingerprint).cloned()
    }

    /// Returns the cached recordings only while the entry is unexpired
    pub async fn get_fresh(&self, fingerprint: &str) -> Option<Vec<Recording>> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(fingerprint)
            .filter(|entry| entry.is_fresh_at(now))
            .map(|entry| entry.recordings.clone())
    }

    /// Stores `recordings` under `fingerprint`, replacing any previous entry
    pub async fn put(&self, fingerprint: impl Into<String>, recordings: Vec<Recording>) {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let entry = CacheEntry {
            recordings,
            expires_at,
        };
        self.entries.write().await.insert(fingerprint.into(), entry);
    }

    /// Drops every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh_at(now));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Purged expired search cache entries");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
