//! Pomodoro and identity handlers

use lounge_core::prelude::*;
use lounge_core::TimerMode;

use super::UpdateResult;
use crate::pomodoro::TickOutcome;
use crate::state::AppState;

pub(crate) fn handle_tick(state: &mut AppState) -> UpdateResult {
    match state.pomodoro.tick() {
        TickOutcome::Completed(completion) => {
            state.last_completion = Some(completion);
        }
        TickOutcome::Idle => trace!("Tick while paused, ignoring"),
        TickOutcome::Counted => {}
    }
    UpdateResult::none()
}

pub(crate) fn handle_skip(state: &mut AppState) -> UpdateResult {
    match state.pomodoro.state().mode {
        TimerMode::Work => state.pomodoro.skip_to_break(),
        TimerMode::Break => state.pomodoro.skip_to_work(),
    }
    UpdateResult::none()
}

pub(crate) fn handle_user_resolved(state: &mut AppState, user_id: Option<String>) -> UpdateResult {
    state.set_identity(user_id.as_deref());
    UpdateResult::none()
}
