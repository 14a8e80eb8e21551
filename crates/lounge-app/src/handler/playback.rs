//! Playback handlers
//!
//! Whenever a command leaves the same track selected but rewinds it, the
//! mounted driver has to be told to seek as well; the host only remounts on
//! track changes.

use lounge_core::prelude::*;
use lounge_core::{DriverEvent, Track};

use super::{UpdateAction, UpdateResult};
use crate::drivers::DriverCommand;
use crate::player::{PlaybackController, TrackEnd};
use crate::state::AppState;

pub(crate) fn handle_set_volume(state: &mut AppState, volume: f64) -> UpdateResult {
    state.player.set_volume(volume);
    UpdateResult::action(UpdateAction::Driver(DriverCommand::SetVolume(
        state.player.state().volume,
    )))
}

pub(crate) fn handle_seek(state: &mut AppState, seconds: f64) -> UpdateResult {
    if state.player.state().current_track.is_none() || !seconds.is_finite() {
        return UpdateResult::none();
    }
    state.player.set_progress(seconds);
    UpdateResult::action(UpdateAction::Driver(DriverCommand::Seek(
        state.player.state().progress,
    )))
}

/// Run a queue navigation command and rewind the driver if it stayed on the
/// same track
pub(crate) fn handle_navigation(
    state: &mut AppState,
    navigate: impl FnOnce(&mut PlaybackController),
) -> UpdateResult {
    let before = Position::capture(&state.player);
    navigate(&mut state.player);
    rewind_if_restarted(&before, &state.player)
}

pub(crate) fn handle_play_track(state: &mut AppState, track: Track) -> UpdateResult {
    let before = Position::capture(&state.player);
    info!("Playing {} - {}", track.artist, track.name);

    state.player.set_current_track(Some(track.clone()));
    state.player.play();
    state.record_play(track);

    rewind_if_restarted(&before, &state.player)
}

pub(crate) fn handle_play_queue(
    state: &mut AppState,
    tracks: Vec<Track>,
    start: usize,
) -> UpdateResult {
    let Some(track) = tracks.get(start.min(tracks.len().saturating_sub(1))).cloned() else {
        debug!("Ignoring empty queue");
        return UpdateResult::none();
    };

    let before = Position::capture(&state.player);
    state.player.set_queue(tracks);
    state.player.set_current_track(Some(track.clone()));
    state.player.play();
    state.record_play(track);

    rewind_if_restarted(&before, &state.player)
}

pub(crate) fn handle_driver_event(state: &mut AppState, event: DriverEvent) -> UpdateResult {
    match event {
        DriverEvent::Progress(seconds) => {
            state.player.set_progress(seconds);
            UpdateResult::none()
        }
        DriverEvent::DurationKnown(seconds) => {
            state.player.set_duration(seconds);
            UpdateResult::none()
        }
        DriverEvent::Ended => {
            let before = Position::capture(&state.player);
            match state.player.handle_track_end() {
                TrackEnd::Restarted => seek_to_start(),
                TrackEnd::Advanced | TrackEnd::Stopped => {
                    rewind_if_restarted(&before, &state.player)
                }
            }
        }
        DriverEvent::Error(reason) => {
            warn!("Track cannot play, skipping: {}", reason);
            let before = Position::capture(&state.player);
            state.player.handle_track_error();
            rewind_if_restarted(&before, &state.player)
        }
        DriverEvent::PlaybackRejected(reason) => {
            warn!("Playback rejected by backend: {}", reason);
            state.player.pause();
            UpdateResult::none()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

struct Position {
    track_id: Option<String>,
    progress: f64,
}

impl Position {
    fn capture(player: &PlaybackController) -> Self {
        Self {
            track_id: player.state().current_track_id().map(str::to_string),
            progress: player.state().progress,
        }
    }
}

fn rewind_if_restarted(before: &Position, player: &PlaybackController) -> UpdateResult {
    let after = player.state();
    let same_track = before.track_id.is_some() && before.track_id.as_deref() == after.current_track_id();
    if same_track && before.progress > 0.0 && after.progress == 0.0 {
        seek_to_start()
    } else {
        UpdateResult::none()
    }
}

fn seek_to_start() -> UpdateResult {
    UpdateResult::action(UpdateAction::Driver(DriverCommand::Seek(0.0)))
}
