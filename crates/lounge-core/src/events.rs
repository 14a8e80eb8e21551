//! Playback backend event definitions
//!
//! Raw events arrive from whichever backend is rendering the current track
//! ([`AudioEvent`] for the native audio element, [`EmbeddedEvent`] for the
//! embedded video platform). Drivers normalize them into [`DriverEvent`]s,
//! which is the only shape the playback controller ever sees.

use serde::{Deserialize, Serialize};

/// Events emitted by the native audio element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AudioEvent {
    /// Current playback position changed (seconds)
    TimeUpdate { current_time: f64 },
    /// Media metadata loaded; duration is now known (seconds)
    LoadedMetadata { duration: f64 },
    /// Playback reached the natural end of the media
    Ended,
}

/// Player states reported by the embedded video platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmbeddedState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl EmbeddedState {
    /// Map the platform's numeric state code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(EmbeddedState::Unstarted),
            0 => Some(EmbeddedState::Ended),
            1 => Some(EmbeddedState::Playing),
            2 => Some(EmbeddedState::Paused),
            3 => Some(EmbeddedState::Buffering),
            5 => Some(EmbeddedState::Cued),
            _ => None,
        }
    }
}

/// Events emitted by the embedded video platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmbeddedEvent {
    /// The player finished initializing and accepts commands
    Ready,
    /// Player state changed (raw platform code)
    StateChange { code: i32 },
    /// The video failed to load or play (raw platform error code)
    Error { code: i32 },
}

/// A raw event from either backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum BackendEvent {
    Audio(AudioEvent),
    Embedded(EmbeddedEvent),
}

/// Normalized driver-to-controller event
#[derive(Debug, Clone, PartialEq)]
pub enum DriverEvent {
    /// Elapsed time of the current track (seconds)
    Progress(f64),
    /// Total length of the current track became known (seconds)
    DurationKnown(f64),
    /// The track reached its natural end
    Ended,
    /// The backend cannot play this track
    Error(String),
    /// The backend refused to start playback (e.g. autoplay policy)
    PlaybackRejected(String),
}
