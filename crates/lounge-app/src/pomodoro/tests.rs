use std::sync::Arc;

use lounge_core::{StorageScope, TimerMode};

use super::*;
use crate::config::{
    load_pomodoro_record, save_pomodoro_patch, ConfigStore, MemoryConfigStore, MockConfigStore,
    PomodoroRecord, MAX_INTERVAL_MINUTES,
};
use crate::notify::{DisabledNotifier, MockNotifier, NotificationPermission, Notifier};

fn controller_with(store: Arc<MemoryConfigStore>) -> PomodoroController {
    PomodoroController::new(store, Arc::new(DisabledNotifier))
}

fn controller() -> PomodoroController {
    controller_with(Arc::new(MemoryConfigStore::new()))
}

/// Store with `completed` sessions recorded for guest
fn store_with_sessions(completed: u32) -> Arc<MemoryConfigStore> {
    let store = Arc::new(MemoryConfigStore::new());
    save_pomodoro_patch(
        store.as_ref(),
        &StorageScope::Guest,
        PomodoroRecord {
            completed_sessions: Some(completed),
            ..Default::default()
        },
    );
    store
}

/// Run the timer down to its final second
fn run_to_last_second(pomodoro: &mut PomodoroController) {
    pomodoro.start();
    while pomodoro.state().time_remaining > 1 {
        assert_eq!(pomodoro.tick(), TickOutcome::Counted);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults & run state
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults() {
    let state = controller().state().clone();
    assert_eq!(state.mode, TimerMode::Work);
    assert_eq!(state.time_remaining, 25 * 60);
    assert_eq!(state.work_duration, 25);
    assert_eq!(state.break_duration, 5);
    assert_eq!(state.long_break_duration, 15);
    assert_eq!(state.sessions_until_long_break, 4);
    assert_eq!(state.completed_sessions, 0);
    assert!(!state.is_running);
    assert_eq!(state.user_id(), None);
}

#[test]
fn test_tick_while_paused_is_idle() {
    let mut pomodoro = controller();
    assert_eq!(pomodoro.tick(), TickOutcome::Idle);
    assert_eq!(pomodoro.state().time_remaining, 25 * 60);
}

#[test]
fn test_tick_counts_down_one_second() {
    let mut pomodoro = controller();
    pomodoro.start();
    pomodoro.start();
    assert_eq!(pomodoro.tick(), TickOutcome::Counted);
    assert_eq!(pomodoro.state().time_remaining, 25 * 60 - 1);

    pomodoro.pause();
    assert_eq!(pomodoro.tick(), TickOutcome::Idle);
    assert_eq!(pomodoro.state().time_remaining, 25 * 60 - 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Interval completion
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_completion_into_long_break() {
    let store = store_with_sessions(3);
    let mut pomodoro = controller_with(store.clone());
    pomodoro.set_user_id(None);
    pomodoro.set_work_duration(1);
    run_to_last_second(&mut pomodoro);

    let outcome = pomodoro.tick();

    assert_eq!(
        outcome,
        TickOutcome::Completed(IntervalCompletion {
            from: TimerMode::Work,
            to: TimerMode::Break,
            completed_sessions: 4,
            is_long_break: true,
        })
    );
    let state = pomodoro.state();
    assert_eq!(state.mode, TimerMode::Break);
    assert_eq!(state.completed_sessions, 4);
    assert_eq!(state.time_remaining, state.long_break_duration * 60);
    assert!(!state.is_running);

    let record = load_pomodoro_record(store.as_ref(), &StorageScope::Guest);
    assert_eq!(record.completed_sessions, Some(4));
}

#[test]
fn test_completion_into_short_break() {
    let mut pomodoro = controller_with(store_with_sessions(1));
    pomodoro.set_user_id(None);
    pomodoro.set_work_duration(1);
    run_to_last_second(&mut pomodoro);

    pomodoro.tick();

    let state = pomodoro.state();
    assert_eq!(state.completed_sessions, 2);
    assert_eq!(state.time_remaining, state.break_duration * 60);
}

#[test]
fn test_break_completion_keeps_counter_and_auto_starts_work() {
    let mut pomodoro = controller();
    pomodoro.toggle_auto_start_work();
    pomodoro.set_break_duration(1);
    pomodoro.skip_to_break();
    assert_eq!(pomodoro.state().completed_sessions, 1);
    run_to_last_second(&mut pomodoro);

    let outcome = pomodoro.tick();

    assert!(matches!(
        outcome,
        TickOutcome::Completed(IntervalCompletion {
            from: TimerMode::Break,
            to: TimerMode::Work,
            completed_sessions: 1,
            ..
        })
    ));
    assert_eq!(pomodoro.state().mode, TimerMode::Work);
    assert_eq!(pomodoro.state().time_remaining, 25 * 60);
    assert!(pomodoro.state().is_running);
}

#[test]
fn test_completion_auto_starts_break() {
    let mut pomodoro = controller();
    pomodoro.toggle_auto_start_breaks();
    pomodoro.set_work_duration(1);
    run_to_last_second(&mut pomodoro);

    pomodoro.tick();

    assert_eq!(pomodoro.state().mode, TimerMode::Break);
    assert!(pomodoro.state().is_running);
}

#[test]
fn test_completion_announces_when_granted() {
    let mut notifier = MockNotifier::new();
    notifier
        .expect_permission()
        .return_const(NotificationPermission::Granted);
    notifier
        .expect_show()
        .withf(|n| n.title == "Great work!" && n.body == "Session 1 complete. Take a break!")
        .times(1)
        .returning(|_| Ok(()));
    let notifier: Arc<dyn Notifier> = Arc::new(notifier);

    let mut pomodoro = PomodoroController::new(Arc::new(MemoryConfigStore::new()), notifier);
    pomodoro.set_work_duration(1);
    run_to_last_second(&mut pomodoro);
    pomodoro.tick();
}

#[test]
fn test_time_remaining_never_underflows() {
    let mut pomodoro = controller();
    pomodoro.toggle_auto_start_breaks();
    pomodoro.toggle_auto_start_work();
    pomodoro.set_work_duration(1);
    pomodoro.set_break_duration(1);
    pomodoro.start();

    for _ in 0..500 {
        pomodoro.tick();
        assert!(pomodoro.state().time_remaining >= 1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reset & skips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_reset_is_idempotent() {
    let mut pomodoro = controller();
    pomodoro.start();
    pomodoro.tick();
    pomodoro.tick();

    pomodoro.reset();
    let first = pomodoro.state().time_remaining;
    pomodoro.reset();

    assert_eq!(pomodoro.state().time_remaining, first);
    assert_eq!(first, 25 * 60);
    assert!(!pomodoro.state().is_running);
}

#[test]
fn test_reset_in_break_uses_long_break_rule() {
    let mut pomodoro = controller_with(store_with_sessions(3));
    pomodoro.set_user_id(None);
    pomodoro.skip_to_break();
    pomodoro.start();
    pomodoro.tick();

    pomodoro.reset();

    assert_eq!(pomodoro.state().mode, TimerMode::Break);
    assert_eq!(pomodoro.state().time_remaining, 15 * 60);
}

#[test]
fn test_skip_to_break_counts_session() {
    let store = Arc::new(MemoryConfigStore::new());
    let mut pomodoro = controller_with(store.clone());

    pomodoro.skip_to_break();

    let state = pomodoro.state();
    assert_eq!(state.mode, TimerMode::Break);
    assert_eq!(state.completed_sessions, 1);
    assert_eq!(state.time_remaining, 5 * 60);
    assert!(!state.is_running);
    assert_eq!(
        load_pomodoro_record(store.as_ref(), &StorageScope::Guest).completed_sessions,
        Some(1)
    );
}

#[test]
fn test_skip_to_work_leaves_counter() {
    let mut pomodoro = controller();
    pomodoro.skip_to_break();
    pomodoro.toggle_auto_start_work();

    pomodoro.skip_to_work();

    let state = pomodoro.state();
    assert_eq!(state.mode, TimerMode::Work);
    assert_eq!(state.completed_sessions, 1);
    assert_eq!(state.time_remaining, 25 * 60);
    assert!(state.is_running);
}

// ─────────────────────────────────────────────────────────────────────────────
// Setters
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_work_duration_applies_when_idle_in_work() {
    let mut pomodoro = controller();
    pomodoro.set_work_duration(50);
    assert_eq!(pomodoro.state().time_remaining, 50 * 60);
}

#[test]
fn test_work_duration_deferred_while_running() {
    let mut pomodoro = controller();
    pomodoro.start();
    pomodoro.set_work_duration(50);
    assert_eq!(pomodoro.state().work_duration, 50);
    assert_eq!(pomodoro.state().time_remaining, 25 * 60);
}

#[test]
fn test_break_duration_deferred_in_work_mode() {
    let mut pomodoro = controller();
    pomodoro.set_break_duration(10);
    assert_eq!(pomodoro.state().time_remaining, 25 * 60);

    pomodoro.skip_to_break();
    pomodoro.set_break_duration(8);
    assert_eq!(pomodoro.state().time_remaining, 8 * 60);
}

#[test]
fn test_setters_clamp_and_persist() {
    let store = Arc::new(MemoryConfigStore::new());
    let mut pomodoro = controller_with(store.clone());

    pomodoro.set_work_duration(0);
    pomodoro.set_long_break_duration(30);
    pomodoro.set_sessions_until_long_break(1);
    pomodoro.toggle_auto_start_breaks();

    let record = load_pomodoro_record(store.as_ref(), &StorageScope::Guest);
    assert_eq!(record.work_duration, Some(1));
    assert_eq!(record.long_break_duration, Some(30));
    assert_eq!(record.sessions_until_long_break, Some(2));
    assert_eq!(record.auto_start_breaks, Some(true));
    assert_eq!(record.break_duration, None);
}

#[test]
fn test_huge_durations_are_capped() {
    let store = Arc::new(MemoryConfigStore::new());
    let mut pomodoro = controller_with(store.clone());

    pomodoro.set_work_duration(80_000_000);
    assert_eq!(pomodoro.state().work_duration, MAX_INTERVAL_MINUTES);
    assert_eq!(pomodoro.state().time_remaining, MAX_INTERVAL_MINUTES * 60);

    pomodoro.skip_to_break();
    pomodoro.set_break_duration(u32::MAX);
    assert_eq!(pomodoro.state().time_remaining, MAX_INTERVAL_MINUTES * 60);

    pomodoro.set_long_break_duration(u32::MAX);
    let record = load_pomodoro_record(store.as_ref(), &StorageScope::Guest);
    assert_eq!(record.work_duration, Some(MAX_INTERVAL_MINUTES));
    assert_eq!(record.break_duration, Some(MAX_INTERVAL_MINUTES));
    assert_eq!(record.long_break_duration, Some(MAX_INTERVAL_MINUTES));
}

#[test]
fn test_set_task_is_not_persisted() {
    let store = Arc::new(MemoryConfigStore::new());
    let mut pomodoro = controller_with(store.clone());
    pomodoro.set_task("write report");
    assert_eq!(pomodoro.state().current_task, "write report");
    assert!(store.is_empty());
}

#[test]
fn test_persistence_failures_are_swallowed() {
    let mut store = MockConfigStore::new();
    store
        .expect_read()
        .returning(|_| Err(lounge_core::Error::store("unavailable")));
    store
        .expect_write()
        .returning(|_, _| Err(lounge_core::Error::store("unavailable")));
    let store: Arc<dyn ConfigStore> = Arc::new(store);

    let mut pomodoro = PomodoroController::new(store, Arc::new(DisabledNotifier));
    pomodoro.set_user_id(Some("u1"));
    pomodoro.set_work_duration(30);
    pomodoro.skip_to_break();

    assert_eq!(pomodoro.state().work_duration, 30);
    assert_eq!(pomodoro.state().completed_sessions, 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_identity_switch_reloads_record() {
    let store = Arc::new(MemoryConfigStore::new());
    save_pomodoro_patch(
        store.as_ref(),
        &StorageScope::User("u1".into()),
        PomodoroRecord {
            work_duration: Some(40),
            ..Default::default()
        },
    );
    let mut pomodoro = controller_with(store);
    pomodoro.skip_to_break();
    pomodoro.start();

    pomodoro.set_user_id(Some("u1"));

    let state = pomodoro.state();
    assert_eq!(state.work_duration, 40);
    assert_eq!(state.time_remaining, 40 * 60);
    assert_eq!(state.mode, TimerMode::Work);
    assert!(!state.is_running);
    assert_eq!(state.user_id(), Some("u1"));
}

#[test]
fn test_identity_switch_without_record_applies_defaults() {
    let mut pomodoro = controller();
    pomodoro.set_work_duration(45);
    pomodoro.skip_to_break();
    pomodoro.set_task("keep me");

    pomodoro.set_user_id(Some("fresh"));

    let state = pomodoro.state();
    assert_eq!(state.work_duration, 25);
    assert_eq!(state.completed_sessions, 0);
    assert_eq!(state.time_remaining, 25 * 60);
    assert_eq!(state.current_task, "keep me");
}

#[test]
fn test_identity_switch_clamps_stored_values() {
    let store = Arc::new(MemoryConfigStore::new().with_entry(
        "pomodoro-storage-u2",
        "work_duration = 0\nsessions_until_long_break = 0\n",
    ));
    let mut pomodoro = controller_with(store);

    pomodoro.set_user_id(Some("u2"));

    assert_eq!(pomodoro.state().work_duration, 1);
    assert_eq!(pomodoro.state().sessions_until_long_break, 2);
}

#[test]
fn test_identity_switch_caps_oversized_stored_durations() {
    let store = Arc::new(MemoryConfigStore::new().with_entry(
        "pomodoro-storage-u1",
        "work_duration = 4000000000\nlong_break_duration = 90000000\n",
    ));
    let mut pomodoro = controller_with(store);

    pomodoro.set_user_id(Some("u1"));

    let state = pomodoro.state();
    assert_eq!(state.work_duration, MAX_INTERVAL_MINUTES);
    assert_eq!(state.time_remaining, MAX_INTERVAL_MINUTES * 60);
    assert_eq!(state.long_break_duration, MAX_INTERVAL_MINUTES);
}

#[test]
fn test_interval_secs_saturates_on_unclamped_state() {
    let state = PomodoroState {
        long_break_duration: u32::MAX,
        ..PomodoroState::default()
    };
    assert_eq!(state.interval_secs(TimerMode::Break, true), u32::MAX);
}

#[test]
fn test_writes_go_to_active_identity() {
    let store = Arc::new(MemoryConfigStore::new());
    let mut pomodoro = controller_with(store.clone());

    pomodoro.set_user_id(Some("u1"));
    pomodoro.set_break_duration(9);
    pomodoro.set_user_id(None);

    assert_eq!(pomodoro.state().break_duration, 5);
    assert_eq!(
        load_pomodoro_record(store.as_ref(), &StorageScope::User("u1".into())).break_duration,
        Some(9)
    );
}
