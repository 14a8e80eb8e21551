//! Pomodoro controller: tick-driven work/break countdown
//!
//! The controller never schedules time itself. Something outside (the
//! engine's ticker) calls [`PomodoroController::tick`] once per second while
//! the timer runs.

use std::sync::Arc;

use lounge_core::prelude::*;
use lounge_core::{StorageScope, TimerMode};

use super::state::{minutes_to_secs, PomodoroState};
use crate::config::{
    clamp_interval_minutes, load_pomodoro_record, save_pomodoro_patch, ConfigStore,
    PomodoroConfig, PomodoroRecord, MIN_SESSIONS_UNTIL_LONG_BREAK,
};
use crate::notify::{announce, Notification, Notifier};

/// A finished interval and what it rolled over into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalCompletion {
    pub from: TimerMode,
    pub to: TimerMode,
    /// Counter after the completion was applied
    pub completed_sessions: u32,
    pub is_long_break: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer not running; nothing changed
    Idle,
    /// One second counted down
    Counted,
    Completed(IntervalCompletion),
}

pub struct PomodoroController {
    state: PomodoroState,
    store: Arc<dyn ConfigStore>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for PomodoroController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PomodoroController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl PomodoroController {
    /// Guest scope with default durations; call [`Self::set_user_id`] to
    /// load a persisted record
    pub fn new(store: Arc<dyn ConfigStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: PomodoroState::default(),
            store,
            notifier,
        }
    }

    pub fn state(&self) -> &PomodoroState {
        &self.state
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Run state
    // ─────────────────────────────────────────────────────────────────────────

    pub fn start(&mut self) {
        if !self.state.is_running {
            debug!("Pomodoro started ({})", self.state.mode);
            self.state.is_running = true;
        }
    }

    pub fn pause(&mut self) {
        self.state.is_running = false;
    }

    /// Restart the current interval from its full length, paused
    pub fn reset(&mut self) {
        let completed = self.state.completed_sessions;
        let long_break = completed > 0 && self.state.is_long_break_at(completed);
        self.state.time_remaining = self.state.interval_secs(self.state.mode, long_break);
        self.state.is_running = false;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running {
            return TickOutcome::Idle;
        }

        if self.state.time_remaining > 1 {
            self.state.time_remaining -= 1;
            return TickOutcome::Counted;
        }

        TickOutcome::Completed(self.complete_interval())
    }

    fn complete_interval(&mut self) -> IntervalCompletion {
        let from = self.state.mode;
        let to = from.flipped();

        if from == TimerMode::Work {
            self.state.completed_sessions += 1;
        }
        let completed = self.state.completed_sessions;
        let is_long_break = self.state.is_long_break_at(completed);

        self.state.mode = to;
        self.state.time_remaining = self.state.interval_secs(to, is_long_break);
        self.state.is_running = match to {
            TimerMode::Work => self.state.auto_start_work,
            TimerMode::Break => self.state.auto_start_breaks,
        };

        self.persist(PomodoroRecord {
            completed_sessions: Some(completed),
            ..Default::default()
        });

        let completion = IntervalCompletion {
            from,
            to,
            completed_sessions: completed,
            is_long_break,
        };
        info!(
            "Interval complete: {} -> {} (sessions: {}, long break: {})",
            from, to, completed, is_long_break
        );
        announce(
            self.notifier.as_ref(),
            &Notification::interval_completed(&completion),
        );
        completion
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Skips
    // ─────────────────────────────────────────────────────────────────────────

    pub fn skip_to_break(&mut self) {
        self.state.completed_sessions += 1;
        let completed = self.state.completed_sessions;
        let long_break = self.state.is_long_break_at(completed);

        self.state.mode = TimerMode::Break;
        self.state.time_remaining = self.state.interval_secs(TimerMode::Break, long_break);
        self.state.is_running = self.state.auto_start_breaks;

        self.persist(PomodoroRecord {
            completed_sessions: Some(completed),
            ..Default::default()
        });
    }

    pub fn skip_to_work(&mut self) {
        self.state.mode = TimerMode::Work;
        self.state.time_remaining = self.state.interval_secs(TimerMode::Work, false);
        self.state.is_running = self.state.auto_start_work;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_task(&mut self, task: impl Into<String>) {
        self.state.current_task = task.into();
    }

    pub fn set_work_duration(&mut self, minutes: u32) {
        let minutes = clamp_interval_minutes(minutes);
        self.state.work_duration = minutes;
        self.persist(PomodoroRecord {
            work_duration: Some(minutes),
            ..Default::default()
        });
        if self.state.mode == TimerMode::Work && !self.state.is_running {
            self.state.time_remaining = minutes_to_secs(minutes);
        }
    }

    pub fn set_break_duration(&mut self, minutes: u32) {
        let minutes = clamp_interval_minutes(minutes);
        self.state.break_duration = minutes;
        self.persist(PomodoroRecord {
            break_duration: Some(minutes),
            ..Default::default()
        });
        if self.state.mode == TimerMode::Break && !self.state.is_running {
            self.state.time_remaining = minutes_to_secs(minutes);
        }
    }

    pub fn set_long_break_duration(&mut self, minutes: u32) {
        let minutes = clamp_interval_minutes(minutes);
        self.state.long_break_duration = minutes;
        self.persist(PomodoroRecord {
            long_break_duration: Some(minutes),
            ..Default::default()
        });
    }

    pub fn set_sessions_until_long_break(&mut self, sessions: u32) {
        let sessions = sessions.max(MIN_SESSIONS_UNTIL_LONG_BREAK);
        self.state.sessions_until_long_break = sessions;
        self.persist(PomodoroRecord {
            sessions_until_long_break: Some(sessions),
            ..Default::default()
        });
    }

    pub fn toggle_auto_start_breaks(&mut self) {
        let value = !self.state.auto_start_breaks;
        self.state.auto_start_breaks = value;
        self.persist(PomodoroRecord {
            auto_start_breaks: Some(value),
            ..Default::default()
        });
    }

    pub fn toggle_auto_start_work(&mut self) {
        let value = !self.state.auto_start_work;
        self.state.auto_start_work = value;
        self.persist(PomodoroRecord {
            auto_start_work: Some(value),
            ..Default::default()
        });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────────

    /// Switch identity and reload its record.
    ///
    /// Missing fields fall back to defaults. The timer always lands on an
    /// idle work interval; the current task label is kept.
    pub fn set_user_id(&mut self, user_id: Option<&str>) {
        let scope = StorageScope::from_user_id(user_id);
        let config = clamp_config(load_pomodoro_record(self.store.as_ref(), &scope).resolve());
        info!("Pomodoro scope -> {:?}", scope);

        let task = std::mem::take(&mut self.state.current_task);
        self.state = PomodoroState::from_config(config, scope);
        self.state.current_task = task;
    }

    fn persist(&self, patch: PomodoroRecord) {
        save_pomodoro_patch(self.store.as_ref(), &self.state.scope, patch);
    }
}

/// Hand-edited records can hold values the setters would never produce
fn clamp_config(config: PomodoroConfig) -> PomodoroConfig {
    PomodoroConfig {
        work_duration: clamp_interval_minutes(config.work_duration),
        break_duration: clamp_interval_minutes(config.break_duration),
        long_break_duration: clamp_interval_minutes(config.long_break_duration),
        sessions_until_long_break: config
            .sessions_until_long_break
            .max(MIN_SESSIONS_UNTIL_LONG_BREAK),
        ..config
    }
}
