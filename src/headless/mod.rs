//! Headless mode - JSON event output for scripting and E2E testing
//!
//! This module drives the Pomodoro controller without a UI. Commands arrive
//! as lines on stdin, state changes leave as structured JSON events on stdout.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"pomodoro_state","mode":"work","time_remaining":1500,"is_running":true,"completed_sessions":0,"work_duration":25,"break_duration":5,"long_break_duration":15,"sessions_until_long_break":4,"current_task":"","user_id":null,"timestamp":1704700001000}
//! {"event":"pomodoro_tick","mode":"work","time_remaining":1499,"is_running":true,"completed_sessions":0,"timestamp":1704700002000}
//! {"event":"interval_completed","from":"work","to":"break","completed_sessions":1,"is_long_break":false,"timestamp":1704701500000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use lounge_app::{EngineEvent, PomodoroState};
use lounge_core::prelude::*;
use lounge_core::TimerMode;
use serde::Serialize;

/// Events emitted in headless mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Visible timer state changed (every second while running)
    PomodoroTick {
        mode: TimerMode,
        time_remaining: u32,
        is_running: bool,
        completed_sessions: u32,
        timestamp: i64,
    },

    /// An interval ran out and the timer rolled over
    IntervalCompleted {
        from: TimerMode,
        to: TimerMode,
        completed_sessions: u32,
        is_long_break: bool,
        timestamp: i64,
    },

    /// Full timer snapshot (startup and `status`)
    PomodoroState {
        mode: TimerMode,
        time_remaining: u32,
        is_running: bool,
        completed_sessions: u32,
        work_duration: u32,
        break_duration: u32,
        long_break_duration: u32,
        sessions_until_long_break: u32,
        current_task: String,
        user_id: Option<String>,
        timestamp: i64,
    },

    /// Error occurred
    Error { message: String, timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // NDJSON: one event per line, flushed immediately
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn pomodoro_state(state: &PomodoroState) -> Self {
        Self::PomodoroState {
            mode: state.mode,
            time_remaining: state.time_remaining,
            is_running: state.is_running,
            completed_sessions: state.completed_sessions,
            work_duration: state.work_duration,
            break_duration: state.break_duration,
            long_break_duration: state.long_break_duration,
            sessions_until_long_break: state.sessions_until_long_break,
            current_task: state.current_task.clone(),
            user_id: state.user_id().map(str::to_string),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            timestamp: Self::now(),
        }
    }

    /// Map an engine event to its headless form; playback events have none
    pub fn from_engine_event(event: &EngineEvent) -> Option<Self> {
        match event {
            EngineEvent::PomodoroChanged {
                mode,
                time_remaining,
                is_running,
                completed_sessions,
            } => Some(Self::PomodoroTick {
                mode: *mode,
                time_remaining: *time_remaining,
                is_running: *is_running,
                completed_sessions: *completed_sessions,
                timestamp: Self::now(),
            }),
            EngineEvent::IntervalCompleted(completion) => Some(Self::IntervalCompleted {
                from: completion.from,
                to: completion.to,
                completed_sessions: completion.completed_sessions,
                is_long_break: completion.is_long_break,
                timestamp: Self::now(),
            }),
            _ => None,
        }
    }
}
