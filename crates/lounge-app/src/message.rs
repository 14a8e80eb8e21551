//! Message types for the application (TEA pattern)
//!
//! Every command the UI (or the headless runner) can issue, plus the events
//! the playback backends and the Pomodoro ticker feed back in.

use lounge_core::{BackendEvent, DriverEvent, Track};

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Playback
    // ─────────────────────────────────────────────────────────
    SetCurrentTrack(Option<Track>),
    SetQueue(Vec<Track>),
    AddToQueue(Track),
    /// Remove every queue entry with this track id
    RemoveFromQueue(String),
    ClearQueue,
    Play,
    Pause,
    TogglePlay,
    /// `0.0..=1.0`
    SetVolume(f64),
    /// User scrubbed to a position (seconds); moves the backend too
    Seek(f64),
    /// Backend-reported position (seconds)
    SetProgress(f64),
    /// Backend-reported length (seconds)
    SetDuration(f64),
    NextTrack,
    PrevTrack,
    ToggleRepeat,
    ToggleShuffle,
    SetExpanded(bool),

    /// Start a single track now and remember it as recently played
    PlayTrack(Track),
    /// Replace the queue and start at `start`
    PlayQueue { tracks: Vec<Track>, start: usize },

    // ─────────────────────────────────────────────────────────
    // Playback backends
    // ─────────────────────────────────────────────────────────
    /// Raw event from the audio element or embedded player
    Backend(BackendEvent),
    /// Normalized event from the driver mounted as `generation`
    DriverEvent { generation: u64, event: DriverEvent },

    // ─────────────────────────────────────────────────────────
    // Pomodoro
    // ─────────────────────────────────────────────────────────
    PomodoroStart,
    PomodoroPause,
    PomodoroReset,
    /// One second elapsed while the timer runs. `ticker` is the generation
    /// of the ticker task that sent it.
    PomodoroTick { ticker: u64 },
    PomodoroSkipToBreak,
    PomodoroSkipToWork,
    /// Skip whichever interval is current (work to break, break to work)
    PomodoroSkip,
    SetTask(String),
    /// Minutes
    SetWorkDuration(u32),
    /// Minutes
    SetBreakDuration(u32),
    /// Minutes
    SetLongBreakDuration(u32),
    SetSessionsUntilLongBreak(u32),
    ToggleAutoStartBreaks,
    ToggleAutoStartWork,

    // ─────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────
    /// The identity provider answered; `None` is a guest
    UserResolved(Option<String>),

    Quit,
}
