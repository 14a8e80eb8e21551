//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON; a UI
//! would re-render from them.

use lounge_core::{RepeatMode, TimerMode, Track};

use crate::pomodoro::IntervalCompletion;

/// Domain events emitted by the Engine for external consumers.
///
/// Each variant carries a snapshot of the fields that changed, so
/// subscribers never have to reach back into engine state.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Playback
    // ─────────────────────────────────────────────────────────
    /// The selected track changed (including to nothing)
    TrackChanged { track: Option<Track> },

    /// Transport, volume, mode or queue length changed
    PlayerChanged {
        is_playing: bool,
        volume: f64,
        repeat: RepeatMode,
        shuffle: bool,
        queue_len: usize,
    },

    /// Position or known length of the current track changed (seconds)
    ProgressChanged { progress: f64, duration: f64 },

    // ─────────────────────────────────────────────────────────
    // Pomodoro
    // ─────────────────────────────────────────────────────────
    /// Visible timer state changed
    PomodoroChanged {
        mode: TimerMode,
        time_remaining: u32,
        is_running: bool,
        completed_sessions: u32,
    },

    /// A tick ran an interval down to zero
    IntervalCompleted(IntervalCompletion),

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TrackChanged { .. } => "track_changed",
            Self::PlayerChanged { .. } => "player_changed",
            Self::ProgressChanged { .. } => "progress_changed",
            Self::PomodoroChanged { .. } => "pomodoro_changed",
            Self::IntervalCompleted(_) => "interval_completed",
            Self::Shutdown => "shutdown",
        }
    }
}
