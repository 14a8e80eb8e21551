//! Playback drivers - one strategy per backend behind a common trait
//!
//! Organized into submodules:
//! - `native`: Direct media URLs through the audio element
//! - `embedded`: Video ids through the embedded video player (with progress poller)
//! - `host`: Owns the single mounted driver and keeps it in step with the player
//! - `detached`: Backends for runs without a media surface
//!
//! Backend handles ([`AudioElement`], [`EmbeddedPlayer`]) are the seams the
//! real media surfaces plug into. Their methods may fail with
//! [`Error::BackendNotReady`] before the surface has initialised; drivers
//! treat that as transient and swallow it.

pub mod detached;
pub mod embedded;
pub mod host;
pub mod native;

use lounge_core::prelude::*;
use lounge_core::{BackendEvent, DriverEvent, PlaybackSource};

pub use detached::{DetachedAudio, DetachedEmbedded};
pub use embedded::{EmbeddedVideoDriver, PROGRESS_POLL_INTERVAL};
pub use host::{Backends, DriverCommand, PlaybackHost};
pub use native::NativeAudioDriver;

/// Native audio element
#[cfg_attr(test, mockall::automock)]
pub trait AudioElement: Send + Sync {
    fn set_source(&self, url: &str) -> Result<()>;

    /// May fail with [`Error::PlaybackRejected`] (e.g. autoplay policy)
    fn play(&self) -> Result<()>;

    fn pause(&self) -> Result<()>;

    fn set_current_time(&self, seconds: f64) -> Result<()>;

    /// `0.0..=1.0`
    fn set_volume(&self, volume: f64) -> Result<()>;
}

/// Embedded video platform player
#[cfg_attr(test, mockall::automock)]
pub trait EmbeddedPlayer: Send + Sync {
    fn load_video(&self, video_id: &str) -> Result<()>;

    fn play_video(&self) -> Result<()>;

    fn pause_video(&self) -> Result<()>;

    fn seek_to(&self, seconds: f64) -> Result<()>;

    /// `0..=100`
    fn set_volume(&self, volume: u8) -> Result<()>;

    /// Seconds; only meaningful after the player reported ready
    fn duration(&self) -> Result<f64>;

    fn current_time(&self) -> Result<f64>;
}

/// Common capability every backend driver implements
pub trait PlaybackDriver: Send {
    fn source(&self) -> &PlaybackSource;

    /// Attach to the backend and load the source
    fn mount(&mut self, volume: f64, autoplay: bool) -> Result<()>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// `0.0..=1.0`; drivers rescale for their backend
    fn set_volume(&mut self, volume: f64) -> Result<()>;

    /// Translate a raw backend event. Events from the other backend are ignored.
    fn on_backend_event(&mut self, event: &BackendEvent) -> Vec<DriverEvent>;

    /// Stop playback and release timers; later events are ignored
    fn teardown(&mut self);
}

/// Swallow not-ready failures from a backend call
pub(crate) fn tolerate_not_ready(backend: &str, result: Result<()>) -> Result<()> {
    match result {
        Err(Error::BackendNotReady { .. }) => {
            debug!("{} backend not ready, ignoring command", backend);
            Ok(())
        }
        other => other,
    }
}
