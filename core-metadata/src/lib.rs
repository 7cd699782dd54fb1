//! # Metadata Hydration Module
//!
//! Enriches played tracks with MusicBrainz catalog metadata.
//!
//! ## Overview
//!
//! This module handles:
//! - Search term cleaning and fingerprinting
//! - A TTL cache of recording searches with single-flight misses
//! - Rate-limited, cancellable MusicBrainz recording search
//! - Deterministic best-release selection
//! - Merging the selected recording and release into a [`PlayedTrack`]
//!
//! ## Usage
//!
//! ```ignore
//! use core_metadata::{LatinCleaner, RecordingLookup, TrackHydrator};
//! use std::sync::Arc;
//!
//! let lookup = RecordingLookup::from_config(
//!     http_client,
//!     Arc::new(LatinCleaner::new()),
//!     Arc::new(SystemClock),
//!     &config,
//! )?;
//! let hydrator = TrackHydrator::new(Arc::new(lookup));
//! let hydrated = hydrator.hydrate(&played).await?;
//! ```

pub mod cache;
pub mod cleaner;
pub mod error;
pub mod hydrator;
pub mod models;
pub mod providers;
pub mod release;
pub mod search;

pub use cache::{CacheEntry, SearchCache};
pub use cleaner::{LatinCleaner, MetadataCleaner};
pub use error::{MetadataError, Result};
pub use hydrator::TrackHydrator;
pub use models::{PlayedTrack, TrackArtist};
pub use providers::{
    ArtistCredit, CreditedArtist, MusicBrainzClient, Recording, RecordingFetcher, Release,
};
pub use release::select_best_release;
pub use search::{RecordingLookup, SearchParams};
