//! Application state (Model in TEA pattern)

use std::sync::Arc;

use lounge_core::{StorageScope, Track};
use rand::rngs::StdRng;

use crate::config::{load_recently_played, record_recently_played, ConfigStore};
use crate::notify::Notifier;
use crate::player::PlaybackController;
use crate::pomodoro::{IntervalCompletion, PomodoroController};

/// Complete application state (the Model in TEA)
pub struct AppState {
    pub player: PlaybackController,
    pub pomodoro: PomodoroController,

    /// Most recent first, for the active identity
    pub recently_played: Vec<Track>,

    /// Identity the per-user records are scoped to
    pub scope: StorageScope,

    /// Set by the last tick that completed an interval; drained by the engine
    pub(crate) last_completion: Option<IntervalCompletion>,

    should_quit: bool,

    store: Arc<dyn ConfigStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("player", &self.player)
            .field("pomodoro", &self.pomodoro)
            .field("scope", &self.scope)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn ConfigStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_player(PlaybackController::new(store.clone()), store, notifier)
    }

    /// Deterministic shuffle (tests, replays)
    pub fn with_rng(
        store: Arc<dyn ConfigStore>,
        notifier: Arc<dyn Notifier>,
        rng: StdRng,
    ) -> Self {
        Self::with_player(PlaybackController::with_rng(store.clone(), rng), store, notifier)
    }

    fn with_player(
        player: PlaybackController,
        store: Arc<dyn ConfigStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let scope = StorageScope::Guest;
        Self {
            player,
            pomodoro: PomodoroController::new(store.clone(), notifier),
            recently_played: load_recently_played(store.as_ref(), &scope),
            scope,
            last_completion: None,
            should_quit: false,
            store,
        }
    }

    /// Switch every identity-scoped record to `user_id`
    pub fn set_identity(&mut self, user_id: Option<&str>) {
        self.scope = StorageScope::from_user_id(user_id);
        self.pomodoro.set_user_id(user_id);
        self.recently_played = load_recently_played(self.store.as_ref(), &self.scope);
    }

    pub fn record_play(&mut self, track: Track) {
        self.recently_played = record_recently_played(self.store.as_ref(), &self.scope, track);
    }

    pub fn take_completion(&mut self) -> Option<IntervalCompletion> {
        self.last_completion.take()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }
}
