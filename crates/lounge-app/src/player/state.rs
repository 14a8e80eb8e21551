//! Playback session snapshot

use lounge_core::{PlaybackSource, RepeatMode, Track};

use crate::config::{PlayerPreferences, DEFAULT_VOLUME};

/// Everything the UI reads about the player.
///
/// Only `volume`, `repeat` and `shuffle` outlive the process; see
/// [`PlayerPreferences`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub current_track: Option<Track>,
    pub queue: Vec<Track>,
    pub is_playing: bool,
    /// `0.0..=1.0`
    pub volume: f64,
    /// Seconds elapsed in the current track
    pub progress: f64,
    /// Seconds, as reported by the active backend
    pub duration: f64,
    pub repeat: RepeatMode,
    pub shuffle: bool,
    pub is_expanded: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_track: None,
            queue: Vec::new(),
            is_playing: false,
            volume: DEFAULT_VOLUME,
            progress: 0.0,
            duration: 0.0,
            repeat: RepeatMode::Off,
            shuffle: false,
            is_expanded: false,
        }
    }
}

impl PlayerState {
    pub fn with_preferences(prefs: PlayerPreferences) -> Self {
        Self {
            volume: prefs.volume,
            repeat: prefs.repeat,
            shuffle: prefs.shuffle,
            ..Default::default()
        }
    }

    pub fn preferences(&self) -> PlayerPreferences {
        PlayerPreferences {
            volume: self.volume,
            repeat: self.repeat,
            shuffle: self.shuffle,
        }
    }

    /// Position of the current track in the queue (first match by id)
    pub fn current_index(&self) -> Option<usize> {
        let current = self.current_track.as_ref()?;
        self.queue.iter().position(|t| t.id == current.id)
    }

    pub fn current_track_id(&self) -> Option<&str> {
        self.current_track.as_ref().map(|t| t.id.as_str())
    }

    /// Backend the current track routes to
    pub fn current_source(&self) -> Option<PlaybackSource> {
        self.current_track.as_ref().and_then(Track::source)
    }
}
