//! Persisted record types for Clique Lounge
//!
//! Defines:
//! - `PomodoroRecord` - Partial per-identity Pomodoro record (every field optional)
//! - `PomodoroConfig` - The record with defaults applied
//! - `PlayerPreferences` - Player settings that survive restarts
//! - `RecentlyPlayedFile` - On-disk shape of the recently played list

use lounge_core::{RepeatMode, Track};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORK_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;
pub const DEFAULT_SESSIONS_UNTIL_LONG_BREAK: u32 = 4;
pub const MIN_SESSIONS_UNTIL_LONG_BREAK: u32 = 2;
pub const MIN_INTERVAL_MINUTES: u32 = 1;
/// One day; longer intervals are almost certainly typos
pub const MAX_INTERVAL_MINUTES: u32 = 24 * 60;
pub const DEFAULT_VOLUME: f64 = 0.7;

/// Partial Pomodoro record as stored for one identity.
///
/// Saves are patches: only the fields that are `Some` overwrite what is
/// already stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PomodoroRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_duration: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_duration: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_break_duration: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_until_long_break: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_sessions: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_start_breaks: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_start_work: Option<bool>,
}

impl PomodoroRecord {
    /// Overlay `patch` on top of `self`; fields set in the patch win
    pub fn merge(self, patch: PomodoroRecord) -> Self {
        Self {
            work_duration: patch.work_duration.or(self.work_duration),
            break_duration: patch.break_duration.or(self.break_duration),
            long_break_duration: patch.long_break_duration.or(self.long_break_duration),
            sessions_until_long_break: patch
                .sessions_until_long_break
                .or(self.sessions_until_long_break),
            completed_sessions: patch.completed_sessions.or(self.completed_sessions),
            auto_start_breaks: patch.auto_start_breaks.or(self.auto_start_breaks),
            auto_start_work: patch.auto_start_work.or(self.auto_start_work),
        }
    }

    /// Apply defaults for every missing field
    pub fn resolve(&self) -> PomodoroConfig {
        PomodoroConfig {
            work_duration: self.work_duration.unwrap_or(DEFAULT_WORK_MINUTES),
            break_duration: self.break_duration.unwrap_or(DEFAULT_BREAK_MINUTES),
            long_break_duration: self
                .long_break_duration
                .unwrap_or(DEFAULT_LONG_BREAK_MINUTES),
            sessions_until_long_break: self
                .sessions_until_long_break
                .unwrap_or(DEFAULT_SESSIONS_UNTIL_LONG_BREAK),
            completed_sessions: self.completed_sessions.unwrap_or(0),
            auto_start_breaks: self.auto_start_breaks.unwrap_or(false),
            auto_start_work: self.auto_start_work.unwrap_or(false),
        }
    }
}

/// Bound an interval length to `MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES`
pub fn clamp_interval_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES)
}

/// Fully resolved Pomodoro configuration for one identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroConfig {
    /// Minutes
    pub work_duration: u32,
    /// Minutes
    pub break_duration: u32,
    /// Minutes
    pub long_break_duration: u32,
    pub sessions_until_long_break: u32,
    pub completed_sessions: u32,
    pub auto_start_breaks: bool,
    pub auto_start_work: bool,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        PomodoroRecord::default().resolve()
    }
}

/// Player settings persisted across restarts.
///
/// Track, queue and position are deliberately absent; they never outlive
/// the process.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PlayerPreferences {
    #[serde(default = "default_volume")]
    pub volume: f64,

    #[serde(default)]
    pub repeat: RepeatMode,

    #[serde(default)]
    pub shuffle: bool,
}

impl Default for PlayerPreferences {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            repeat: RepeatMode::Off,
            shuffle: false,
        }
    }
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

/// Recently played list as stored for one identity (most recent first)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RecentlyPlayedFile {
    #[serde(default)]
    pub tracks: Vec<Track>,
}
