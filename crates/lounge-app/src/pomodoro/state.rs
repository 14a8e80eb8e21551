//! Pomodoro session snapshot

use lounge_core::{StorageScope, TimerMode};

use crate::config::PomodoroConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroState {
    pub mode: TimerMode,
    /// Seconds left in the current interval
    pub time_remaining: u32,
    /// Minutes
    pub work_duration: u32,
    /// Minutes
    pub break_duration: u32,
    /// Minutes
    pub long_break_duration: u32,
    pub sessions_until_long_break: u32,
    pub completed_sessions: u32,
    pub current_task: String,
    pub auto_start_breaks: bool,
    pub auto_start_work: bool,
    pub is_running: bool,
    pub scope: StorageScope,
}

impl Default for PomodoroState {
    fn default() -> Self {
        Self::from_config(PomodoroConfig::default(), StorageScope::Guest)
    }
}

impl PomodoroState {
    /// Fresh idle work interval for `scope`
    pub fn from_config(config: PomodoroConfig, scope: StorageScope) -> Self {
        Self {
            mode: TimerMode::Work,
            time_remaining: minutes_to_secs(config.work_duration),
            work_duration: config.work_duration,
            break_duration: config.break_duration,
            long_break_duration: config.long_break_duration,
            sessions_until_long_break: config.sessions_until_long_break,
            completed_sessions: config.completed_sessions,
            current_task: String::new(),
            auto_start_breaks: config.auto_start_breaks,
            auto_start_work: config.auto_start_work,
            is_running: false,
            scope,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.scope.user_id()
    }

    /// Whether `completed` sessions land on a long break
    pub fn is_long_break_at(&self, completed: u32) -> bool {
        self.sessions_until_long_break > 0 && completed % self.sessions_until_long_break == 0
    }

    /// Seconds for a fresh interval of `mode`
    pub fn interval_secs(&self, mode: TimerMode, long_break: bool) -> u32 {
        let minutes = match mode {
            TimerMode::Work => self.work_duration,
            TimerMode::Break if long_break => self.long_break_duration,
            TimerMode::Break => self.break_duration,
        };
        minutes_to_secs(minutes)
    }
}

pub(crate) fn minutes_to_secs(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}
