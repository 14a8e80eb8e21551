//! Integration tests for Pomodoro and player persistence on disk

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use lounge_app::config::{load_pomodoro_record, POMODORO_PREFIX};
use lounge_app::{
    AppState, Backends, DisabledNotifier, Engine, FileConfigStore, Message, TracingNotifier,
};
use lounge_core::{RepeatMode, StorageScope, TimerMode, Track};

/// Engine over a file store rooted in `dir`
fn engine_in(dir: &TempDir) -> Engine {
    let store = Arc::new(FileConfigStore::new(dir.path()));
    Engine::new(store, Arc::new(TracingNotifier), Backends::detached())
}

fn record_path(dir: &TempDir, scope: &StorageScope) -> std::path::PathBuf {
    dir.path().join(format!("{}.toml", scope.key(POMODORO_PREFIX)))
}

#[tokio::test]
async fn test_settings_survive_restart_per_identity() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in(&dir);
        engine.process_message(Message::UserResolved(Some("u1".into())));
        engine.process_message(Message::SetWorkDuration(40));
        engine.process_message(Message::SetSessionsUntilLongBreak(3));
        engine.process_message(Message::ToggleAutoStartBreaks);
        engine.shutdown().await;
    }

    let mut engine = engine_in(&dir);

    // Guest never saw the change
    assert_eq!(engine.state.pomodoro.state().work_duration, 25);

    engine.process_message(Message::UserResolved(Some("u1".into())));
    let state = engine.state.pomodoro.state();
    assert_eq!(state.work_duration, 40);
    assert_eq!(state.time_remaining, 40 * 60);
    assert_eq!(state.sessions_until_long_break, 3);
    assert!(state.auto_start_breaks);
    assert_eq!(state.mode, TimerMode::Work);
    assert!(!state.is_running);
}

#[tokio::test]
async fn test_completed_sessions_persist_across_identity_switch() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in(&dir);
    engine.process_message(Message::UserResolved(Some("u2".into())));

    engine.process_message(Message::PomodoroSkipToBreak);
    engine.process_message(Message::PomodoroSkipToWork);
    engine.process_message(Message::PomodoroSkipToBreak);
    assert_eq!(engine.state.pomodoro.state().completed_sessions, 2);

    engine.process_message(Message::UserResolved(None));
    assert_eq!(engine.state.pomodoro.state().completed_sessions, 0);

    engine.process_message(Message::UserResolved(Some("u2".into())));
    assert_eq!(engine.state.pomodoro.state().completed_sessions, 2);
    assert_eq!(engine.state.pomodoro.state().mode, TimerMode::Work);
}

#[tokio::test]
async fn test_patch_keeps_fields_written_elsewhere() {
    let dir = TempDir::new().unwrap();
    let scope = StorageScope::User("u3".into());
    fs::write(
        record_path(&dir, &scope),
        "break_duration = 7\ncompleted_sessions = 5\n",
    )
    .unwrap();

    let mut engine = engine_in(&dir);
    engine.process_message(Message::UserResolved(Some("u3".into())));
    engine.process_message(Message::SetLongBreakDuration(30));

    let store = FileConfigStore::new(dir.path());
    let record = load_pomodoro_record(&store, &scope);
    assert_eq!(record.break_duration, Some(7));
    assert_eq!(record.completed_sessions, Some(5));
    assert_eq!(record.long_break_duration, Some(30));
}

#[tokio::test]
async fn test_corrupt_record_loads_defaults() {
    let dir = TempDir::new().unwrap();
    let scope = StorageScope::User("u4".into());
    fs::write(record_path(&dir, &scope), "work_duration = \"soon\"\n{{").unwrap();

    let mut engine = engine_in(&dir);
    engine.process_message(Message::UserResolved(Some("u4".into())));

    assert_eq!(engine.state.pomodoro.state().work_duration, 25);

    // The next save replaces the unreadable record
    engine.process_message(Message::SetWorkDuration(30));
    let store = FileConfigStore::new(dir.path());
    assert_eq!(load_pomodoro_record(&store, &scope).work_duration, Some(30));
}

#[tokio::test]
async fn test_player_preferences_restored_but_not_track() {
    let dir = TempDir::new().unwrap();

    {
        let mut engine = engine_in(&dir);
        engine.process_message(Message::SetVolume(0.35));
        engine.process_message(Message::ToggleRepeat);
        engine.process_message(Message::ToggleShuffle);
        engine.process_message(Message::PlayTrack(
            Track::new("t1", "Song", "Artist").with_audio_url("https://cdn.example/t1.mp3"),
        ));
        engine.shutdown().await;
    }

    let store = Arc::new(FileConfigStore::new(dir.path()));
    let state = AppState::new(store, Arc::new(DisabledNotifier));
    let player = state.player.state();

    assert_eq!(player.volume, 0.35);
    assert_eq!(player.repeat, RepeatMode::All);
    assert!(player.shuffle);
    assert!(player.current_track.is_none());
    assert!(!player.is_playing);

    // Recently played is per identity and does survive
    assert_eq!(state.recently_played.len(), 1);
    assert_eq!(state.recently_played[0].id, "t1");
}
