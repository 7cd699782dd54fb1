use bridge_traits::error::BridgeError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("At least one search parameter (track, artist, release) must be provided")]
    InvalidInput,

    #[error("Interrupted while {stage}")]
    Interrupted { stage: &'static str },

    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("MusicBrainz request to {url} returned status {status}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: BridgeError,
    },

    #[error("No results found")]
    NoResults,

    #[error("No release could be selected for recording {recording_id}")]
    MissingRelease { recording_id: String },

    #[error(transparent)]
    Config(#[from] core_runtime::Error),
}

impl MetadataError {
    /// True when the caller's cancellation signal ended the operation
    pub fn is_interrupted(&self) -> bool {
        matches!(self, MetadataError::Interrupted { .. })
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
