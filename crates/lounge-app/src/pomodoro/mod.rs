//! Pomodoro controller - work/break cycle with per-identity persistence
//!
//! Organized into submodules:
//! - `state`: The `PomodoroState` snapshot read by the UI
//! - `controller`: `PomodoroController` commands, tick handling and persistence

mod controller;
mod state;

#[cfg(test)]
mod tests;

pub use controller::{IntervalCompletion, PomodoroController, TickOutcome};
pub use state::PomodoroState;
