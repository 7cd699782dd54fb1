//! Shared fixtures for the core-metadata integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bridge_traits::time::ManualClock;
use core_metadata::{
    ArtistCredit, CreditedArtist, LatinCleaner, MetadataError, Recording, RecordingFetcher,
    RecordingLookup, Release, Result, SearchCache,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// In-memory fetcher that counts calls and can be switched into failure mode
pub struct StubFetcher {
    recordings: Vec<Recording>,
    delay: Duration,
    failing: AtomicBool,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn returning(recordings: Vec<Recording>) -> Self {
        Self {
            recordings,
            delay: Duration::ZERO,
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordingFetcher for StubFetcher {
    async fn search_recordings(
        &self,
        query: &str,
        _cancel: &CancellationToken,
    ) -> Result<Vec<Recording>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(MetadataError::UpstreamStatus {
                status: 503,
                url: "https://mb.test/ws/2/recording".to_string(),
            });
        }

        Ok(self.recordings.clone())
    }
}

/// Lookup over `fetcher` with a manually driven cache clock
pub fn lookup_with(
    fetcher: Arc<StubFetcher>,
    ttl: Duration,
) -> (Arc<RecordingLookup>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::default());
    let cache = SearchCache::new(ttl, clock.clone());
    let lookup = RecordingLookup::new(fetcher, Arc::new(LatinCleaner::new()), cache);
    (Arc::new(lookup), clock)
}

pub fn release(id: &str, title: &str, date: &str, country: &str) -> Release {
    Release {
        id: id.to_string(),
        title: title.to_string(),
        status: "Official".to_string(),
        date: date.to_string(),
        country: country.to_string(),
        disambiguation: String::new(),
        track_count: 10,
    }
}

pub fn credit(id: &str, name: &str) -> ArtistCredit {
    ArtistCredit {
        name: name.to_string(),
        joinphrase: String::new(),
        artist: CreditedArtist {
            id: id.to_string(),
            name: name.to_string(),
            sort_name: name.to_string(),
        },
    }
}

pub fn recording(id: &str, title: &str, releases: Vec<Release>) -> Recording {
    Recording {
        id: id.to_string(),
        title: title.to_string(),
        length: Some(215_000),
        isrcs: vec![format!("ISRC-{}", id)],
        artist_credit: vec![credit("artist-1", "Beyoncé")],
        releases,
    }
}
