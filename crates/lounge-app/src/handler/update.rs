//! Main update function - handles state transitions (TEA pattern)

use lounge_core::prelude::*;

use super::{playback, pomodoro, UpdateAction, UpdateResult};
use crate::message::Message;
use crate::state::AppState;

/// Process a message and update state
/// Returns an optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        // ─────────────────────────────────────────────────────────
        // Playback
        // ─────────────────────────────────────────────────────────
        Message::SetCurrentTrack(track) => {
            playback::handle_navigation(state, |player| player.set_current_track(track))
        }
        Message::SetQueue(tracks) => {
            state.player.set_queue(tracks);
            UpdateResult::none()
        }
        Message::AddToQueue(track) => {
            state.player.add_to_queue(track);
            UpdateResult::none()
        }
        Message::RemoveFromQueue(id) => {
            state.player.remove_from_queue(&id);
            UpdateResult::none()
        }
        Message::ClearQueue => {
            state.player.clear_queue();
            UpdateResult::none()
        }
        Message::Play => {
            state.player.play();
            UpdateResult::none()
        }
        Message::Pause => {
            state.player.pause();
            UpdateResult::none()
        }
        Message::TogglePlay => {
            state.player.toggle();
            UpdateResult::none()
        }
        Message::SetVolume(volume) => playback::handle_set_volume(state, volume),
        Message::Seek(seconds) => playback::handle_seek(state, seconds),
        Message::SetProgress(seconds) => {
            state.player.set_progress(seconds);
            UpdateResult::none()
        }
        Message::SetDuration(seconds) => {
            state.player.set_duration(seconds);
            UpdateResult::none()
        }
        Message::NextTrack => playback::handle_navigation(state, |p| p.next_track()),
        Message::PrevTrack => playback::handle_navigation(state, |p| p.prev_track()),
        Message::ToggleRepeat => {
            state.player.toggle_repeat();
            UpdateResult::none()
        }
        Message::ToggleShuffle => {
            state.player.toggle_shuffle();
            UpdateResult::none()
        }
        Message::SetExpanded(expanded) => {
            state.player.set_expanded(expanded);
            UpdateResult::none()
        }
        Message::PlayTrack(track) => playback::handle_play_track(state, track),
        Message::PlayQueue { tracks, start } => playback::handle_play_queue(state, tracks, start),

        // ─────────────────────────────────────────────────────────
        // Playback backends
        // ─────────────────────────────────────────────────────────
        Message::Backend(event) => UpdateResult::action(UpdateAction::RouteBackendEvent(event)),
        Message::DriverEvent { event, .. } => playback::handle_driver_event(state, event),

        // ─────────────────────────────────────────────────────────
        // Pomodoro
        // ─────────────────────────────────────────────────────────
        Message::PomodoroStart => {
            state.pomodoro.start();
            UpdateResult::none()
        }
        Message::PomodoroPause => {
            state.pomodoro.pause();
            UpdateResult::none()
        }
        Message::PomodoroReset => {
            state.pomodoro.reset();
            UpdateResult::none()
        }
        Message::PomodoroTick { .. } => pomodoro::handle_tick(state),
        Message::PomodoroSkipToBreak => {
            state.pomodoro.skip_to_break();
            UpdateResult::none()
        }
        Message::PomodoroSkipToWork => {
            state.pomodoro.skip_to_work();
            UpdateResult::none()
        }
        Message::PomodoroSkip => pomodoro::handle_skip(state),
        Message::SetTask(task) => {
            state.pomodoro.set_task(task);
            UpdateResult::none()
        }
        Message::SetWorkDuration(minutes) => {
            state.pomodoro.set_work_duration(minutes);
            UpdateResult::none()
        }
        Message::SetBreakDuration(minutes) => {
            state.pomodoro.set_break_duration(minutes);
            UpdateResult::none()
        }
        Message::SetLongBreakDuration(minutes) => {
            state.pomodoro.set_long_break_duration(minutes);
            UpdateResult::none()
        }
        Message::SetSessionsUntilLongBreak(sessions) => {
            state.pomodoro.set_sessions_until_long_break(sessions);
            UpdateResult::none()
        }
        Message::ToggleAutoStartBreaks => {
            state.pomodoro.toggle_auto_start_breaks();
            UpdateResult::none()
        }
        Message::ToggleAutoStartWork => {
            state.pomodoro.toggle_auto_start_work();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Identity & lifecycle
        // ─────────────────────────────────────────────────────────
        Message::UserResolved(user_id) => pomodoro::handle_user_resolved(state, user_id),
        Message::Quit => {
            info!("Quit requested");
            state.request_quit();
            UpdateResult::none()
        }
    }
}
