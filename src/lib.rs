//! Track hydration façade and bootstrap helpers.
//!
//! This crate re-exports the workspace crates and wires host-provided bridge
//! implementations into the metadata core. Desktop hosts typically keep the
//! default `desktop-shims` feature (which depends on `bridge-desktop`) and
//! call [`desktop_hydrator`]; other hosts build a
//! [`RecordingLookup`](core_metadata::RecordingLookup) from their own
//! [`HttpClient`](bridge_traits::http::HttpClient).

pub use bridge_traits;
pub use core_metadata;
pub use core_runtime;

pub use core_metadata::{MetadataError, PlayedTrack, Result, TrackArtist, TrackHydrator};
pub use core_runtime::config::HydrationConfig;
pub use core_runtime::logging::{init_logging, LoggingConfig};

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop;

/// Builds a hydrator backed by `reqwest`, the Latin cleaner and the system
/// clock.
///
/// ```no_run
/// # async fn example() -> track_hydration::Result<()> {
/// use track_hydration::{desktop_hydrator, HydrationConfig, PlayedTrack, TrackArtist};
///
/// let config = HydrationConfig::new("my-scrobbler/1.0 ( ops@example.com )");
/// let hydrator = desktop_hydrator(&config)?;
/// let played = PlayedTrack::new("play-1", "Karma Police", vec![TrackArtist::new("Radiohead")], "");
/// let hydrated = hydrator.hydrate(&played).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - `MetadataError::Config` - `config` does not validate
/// - `MetadataError::Network` - the HTTP client could not be created
#[cfg(feature = "desktop-shims")]
pub fn desktop_hydrator(config: &HydrationConfig) -> Result<TrackHydrator> {
    use bridge_traits::time::SystemClock;
    use core_metadata::{LatinCleaner, RecordingLookup};
    use std::sync::Arc;

    config.validate()?;

    let http_client = bridge_desktop::ReqwestHttpClient::with_timeout(config.request_timeout)
        .map_err(|source| MetadataError::Network {
            url: config.api_base_url.clone(),
            source,
        })?;

    let lookup = RecordingLookup::from_config(
        Arc::new(http_client),
        Arc::new(LatinCleaner::new()),
        Arc::new(SystemClock),
        config,
    )?;

    Ok(TrackHydrator::new(Arc::new(lookup)))
}

#[cfg(all(test, feature = "desktop-shims"))]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_hydrator_rejects_invalid_config() {
        let config = HydrationConfig::new("no-contact-info");
        assert!(matches!(
            desktop_hydrator(&config),
            Err(MetadataError::Config(_))
        ));
    }

    #[test]
    fn test_desktop_hydrator_builds_with_valid_config() {
        let config = HydrationConfig::new("track-hydration-tests/0.1 (tests@example.com)");
        let hydrator = desktop_hydrator(&config).unwrap();
        assert_eq!(hydrator.lookup().cache().ttl(), config.cache_ttl);
    }
}
