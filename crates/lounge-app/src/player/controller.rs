//! Playback controller: queue, transport and position bookkeeping
//!
//! All commands are permissive. Anything that makes no sense for the current
//! state (empty queue, unknown id) leaves the state untouched.

use std::sync::Arc;

use lounge_core::prelude::*;
use lounge_core::{RepeatMode, Track};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::state::PlayerState;
use crate::config::{load_player_preferences, save_player_preferences, ConfigStore};

/// Tracks longer in than this restart instead of skipping back
pub const RESTART_THRESHOLD_SECS: f64 = 3.0;

/// What happened when the current track finished or failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEnd {
    /// Same track from the top (`repeat == one`)
    Restarted,
    /// Moved on to the next queue entry
    Advanced,
    /// Nothing left to play; transport paused
    Stopped,
}

pub struct PlaybackController {
    state: PlayerState,
    store: Arc<dyn ConfigStore>,
    rng: StdRng,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PlaybackController {
    /// Create a controller with persisted preferences applied
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Create a controller with a caller-provided RNG for shuffle
    pub fn with_rng(store: Arc<dyn ConfigStore>, rng: StdRng) -> Self {
        let prefs = load_player_preferences(store.as_ref());
        Self {
            state: PlayerState::with_preferences(prefs),
            store,
            rng,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Track & queue
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_current_track(&mut self, track: Option<Track>) {
        debug!(
            "Current track -> {:?}",
            track.as_ref().map(|t| t.id.as_str())
        );
        self.state.current_track = track;
        self.state.progress = 0.0;
    }

    pub fn set_queue(&mut self, tracks: Vec<Track>) {
        self.state.queue = tracks;
    }

    pub fn add_to_queue(&mut self, track: Track) {
        self.state.queue.push(track);
    }

    /// Remove every queue entry with `id`
    pub fn remove_from_queue(&mut self, id: &str) {
        self.state.queue.retain(|t| t.id != id);
    }

    pub fn clear_queue(&mut self) {
        self.state.queue.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transport
    // ─────────────────────────────────────────────────────────────────────────

    pub fn play(&mut self) {
        self.state.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
    }

    pub fn toggle(&mut self) {
        self.state.is_playing = !self.state.is_playing;
    }

    /// Clamped to `0.0..=1.0`; non-finite values are ignored
    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        if volume == self.state.volume {
            return;
        }
        self.state.volume = volume;
        self.persist_preferences();
    }

    pub fn set_progress(&mut self, seconds: f64) {
        if seconds.is_finite() {
            self.state.progress = seconds.max(0.0);
        }
    }

    pub fn set_duration(&mut self, seconds: f64) {
        if seconds.is_finite() {
            self.state.duration = seconds.max(0.0);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next_track(&mut self) {
        if let Some(index) = self.next_index() {
            self.select(index);
        }
    }

    pub fn prev_track(&mut self) {
        if self.state.queue.is_empty() {
            return;
        }

        if self.state.progress > RESTART_THRESHOLD_SECS {
            self.state.progress = 0.0;
            return;
        }

        // A current track missing from the queue behaves like the first entry
        let current = self.state.current_index().unwrap_or(0);
        let index = if current == 0 {
            self.state.queue.len() - 1
        } else {
            current - 1
        };
        self.select(index);
    }

    pub fn toggle_repeat(&mut self) {
        self.state.repeat = self.state.repeat.cycle();
        debug!("Repeat -> {}", self.state.repeat);
        self.persist_preferences();
    }

    /// Only affects selection in [`Self::next_track`]; the queue order is kept
    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
        debug!("Shuffle -> {}", self.state.shuffle);
        self.persist_preferences();
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.state.is_expanded = expanded;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Backend outcomes
    // ─────────────────────────────────────────────────────────────────────────

    /// The active backend reached the natural end of the current track
    pub fn handle_track_end(&mut self) -> TrackEnd {
        if self.state.repeat == RepeatMode::One && self.state.current_track.is_some() {
            self.state.progress = 0.0;
            return TrackEnd::Restarted;
        }
        self.advance_or_stop()
    }

    /// The active backend cannot play the current track; skip it
    pub fn handle_track_error(&mut self) -> TrackEnd {
        self.advance_or_stop()
    }

    fn advance_or_stop(&mut self) -> TrackEnd {
        if self.at_queue_end() {
            self.state.progress = 0.0;
            self.state.is_playing = false;
            info!("Reached end of queue, stopping");
            return TrackEnd::Stopped;
        }

        match self.next_index() {
            Some(index) => {
                self.select(index);
                TrackEnd::Advanced
            }
            None => {
                self.state.is_playing = false;
                TrackEnd::Stopped
            }
        }
    }

    /// Last entry playing with nowhere further to go
    fn at_queue_end(&self) -> bool {
        let len = self.state.queue.len();
        len > 0
            && !self.state.shuffle
            && self.state.repeat != RepeatMode::All
            && self.state.current_index() == Some(len - 1)
    }

    fn next_index(&mut self) -> Option<usize> {
        let len = self.state.queue.len();
        if len == 0 {
            return None;
        }

        if self.state.shuffle {
            return Some(self.rng.gen_range(0..len));
        }

        Some(match self.state.current_index() {
            Some(i) if i == len - 1 => {
                if self.state.repeat == RepeatMode::All {
                    0
                } else {
                    i
                }
            }
            Some(i) => i + 1,
            None => 0,
        })
    }

    fn select(&mut self, index: usize) {
        let track = self.state.queue.get(index).cloned();
        self.set_current_track(track);
    }

    fn persist_preferences(&self) {
        save_player_preferences(self.store.as_ref(), &self.state.preferences());
    }
}
