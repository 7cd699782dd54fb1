//! External Metadata Providers
//!
//! This module contains clients for external metadata services:
//! - MusicBrainz - Music metadata database (recording search)
//!
//! Each provider implements rate limiting and error handling to comply
//! with API terms of service.

pub mod musicbrainz;

use crate::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub use musicbrainz::{
    ArtistCredit, CreditedArtist, MusicBrainzClient, Recording, RecordingSearchResponse, Release,
};

/// Source of candidate recordings for a catalog query.
///
/// The lookup orchestrator only depends on this trait, so the network client
/// can be replaced by an in-memory source in tests.
#[async_trait]
pub trait RecordingFetcher: Send + Sync {
    /// Runs `query` against the catalog and returns the candidates in the
    /// order the catalog ranked them.
    ///
    /// # Errors
    ///
    /// - `MetadataError::Interrupted` - `cancel` fired while waiting
    /// - `MetadataError::Timeout` - the request deadline elapsed
    /// - `MetadataError::UpstreamStatus` - non-2xx response
    /// - `MetadataError::Decode` - the body was not a valid search response
    async fn search_recordings(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recording>>;
}
