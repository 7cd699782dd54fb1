//! Play-tracking domain models
//!
//! [`PlayedTrack`] is the record the scrobbling pipeline hands to the
//! hydrator. Only the catalog-sourced fields are ever rewritten; play
//! identifiers, timestamps and progress belong to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Artist attached to a played track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackArtist {
    /// Display name
    pub name: String,
    /// Generic identifier (service-specific before hydration)
    pub id: Option<String>,
    /// MusicBrainz artist ID
    pub mbid: Option<String>,
}

impl TrackArtist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            mbid: None,
        }
    }
}

/// A single play reported by a streaming service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedTrack {
    /// Identifier of this play in the source service
    pub play_id: String,
    /// Track title as reported by the source service
    pub name: String,
    /// Artists as reported by the source service
    pub artists: Vec<TrackArtist>,
    /// Album / release title
    pub album: String,
    /// Link to the track in the source service
    pub url: Option<String>,
    /// Base URL of the source service
    pub service_base_url: Option<String>,
    /// MusicBrainz recording ID
    pub recording_mbid: Option<String>,
    /// MusicBrainz release ID
    pub release_mbid: Option<String>,
    pub isrc: Option<String>,
    /// Duration in milliseconds
    pub duration_ms: i64,
    /// Playback progress in milliseconds
    pub progress_ms: i64,
    /// When the play started
    pub timestamp: DateTime<Utc>,
    /// Whether the play has already been recorded downstream
    pub has_stamped: bool,
}

impl PlayedTrack {
    /// Creates a play with the three free-text fields the lookup works from
    pub fn new(
        play_id: impl Into<String>,
        name: impl Into<String>,
        artists: Vec<TrackArtist>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            play_id: play_id.into(),
            name: name.into(),
            artists,
            album: album.into(),
            url: None,
            service_base_url: None,
            recording_mbid: None,
            release_mbid: None,
            isrc: None,
            duration_ms: 0,
            progress_ms: 0,
            timestamp: Utc::now(),
            has_stamped: false,
        }
    }

    /// Artist names joined the way the catalog query expects them
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
