//! Track hydration
//!
//! Turns a play as reported by a streaming service into one carrying
//! MusicBrainz identifiers. The catalog's top-ranked recording is trusted
//! as-is; only its releases go through [`select_best_release`].

use crate::error::{MetadataError, Result};
use crate::models::{PlayedTrack, TrackArtist};
use crate::providers::Recording;
use crate::release::select_best_release;
use crate::search::{RecordingLookup, SearchParams};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Enriches played tracks with catalog metadata
#[derive(Clone)]
pub struct TrackHydrator {
    lookup: Arc<RecordingLookup>,
}

impl TrackHydrator {
    pub fn new(lookup: Arc<RecordingLookup>) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &RecordingLookup {
        &self.lookup
    }

    /// Hydrates `track` from the catalog
    pub async fn hydrate(&self, track: &PlayedTrack) -> Result<PlayedTrack> {
        self.hydrate_with_cancel(track, &CancellationToken::new())
            .await
    }

    /// Hydrates `track` from the catalog, aborting when `cancel` fires.
    ///
    /// The returned track keeps the input's play id, title, URLs, timestamp
    /// and progress. Album, artists, identifiers, ISRC and duration come from
    /// the catalog.
    ///
    /// A recording without a `length` does not reset the duration to zero:
    /// the input `duration_ms` is kept.
    ///
    /// # Errors
    ///
    /// - any error of [`RecordingLookup::search_with_cancel`], unchanged
    /// - `MetadataError::NoResults` - the search matched nothing
    /// - `MetadataError::MissingRelease` - the top recording has no release
    #[instrument(skip_all, fields(play_id = %track.play_id, track = %track.name))]
    pub async fn hydrate_with_cancel(
        &self,
        track: &PlayedTrack,
        cancel: &CancellationToken,
    ) -> Result<PlayedTrack> {
        let params = SearchParams::new(&track.name, track.artist_names(), &track.album);
        let candidates = self.lookup.search_with_cancel(&params, cancel).await?;

        let recording = candidates.first().ok_or(MetadataError::NoResults)?;
        let hydrated = merge_recording(track, recording)?;

        info!(
            recording_mbid = %recording.id,
            release_mbid = hydrated.release_mbid.as_deref().unwrap_or_default(),
            album = %hydrated.album,
            "Hydrated track"
        );

        Ok(hydrated)
    }
}

fn merge_recording(track: &PlayedTrack, recording: &Recording) -> Result<PlayedTrack> {
    let release = select_best_release(&recording.releases, &recording.title).ok_or_else(|| {
        MetadataError::MissingRelease {
            recording_id: recording.id.clone(),
        }
    })?;

    let artists = recording
        .artist_credit
        .iter()
        .map(|credit| TrackArtist {
            name: credit.display_name().to_string(),
            id: Some(credit.artist.id.clone()),
            mbid: Some(credit.artist.id.clone()),
        })
        .collect();

    let isrc = recording
        .isrcs
        .first()
        .cloned()
        .or_else(|| track.isrc.clone());

    let duration_ms = recording
        .length
        .and_then(|length| i64::try_from(length).ok())
        .unwrap_or(track.duration_ms);

    Ok(PlayedTrack {
        artists,
        album: release.title.clone(),
        recording_mbid: Some(recording.id.clone()),
        release_mbid: Some(release.id.clone()),
        isrc,
        duration_ms,
        ..track.clone()
    })
}
