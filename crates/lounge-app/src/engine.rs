//! Engine - application context shared by every frontend
//!
//! The Engine owns the TEA state (both controllers), the playback host, the
//! message channel, the Pomodoro ticker and the event broadcast. Frontends
//! feed messages in and subscribe to [`EngineEvent`]s.

use std::sync::Arc;

use lounge_core::prelude::*;
use lounge_core::{RepeatMode, TimerMode};
use tokio::sync::{broadcast, mpsc};

use crate::config::ConfigStore;
use crate::drivers::{Backends, PlaybackHost};
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::notify::Notifier;
use crate::process;
use crate::signals;
use crate::state::AppState;
use crate::ticker::PomodoroTicker;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    track_id: Option<String>,
    is_playing: bool,
    volume: f64,
    repeat: RepeatMode,
    shuffle: bool,
    queue_len: usize,
    progress: f64,
    duration: f64,
    mode: TimerMode,
    time_remaining: u32,
    is_running: bool,
    completed_sessions: u32,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        let player = state.player.state();
        let pomodoro = state.pomodoro.state();

        Self {
            track_id: player.current_track_id().map(str::to_string),
            is_playing: player.is_playing,
            volume: player.volume,
            repeat: player.repeat,
            shuffle: player.shuffle,
            queue_len: player.queue.len(),
            progress: player.progress,
            duration: player.duration,
            mode: pomodoro.mode,
            time_remaining: pomodoro.time_remaining,
            is_running: pomodoro.is_running,
            completed_sessions: pomodoro.completed_sessions,
        }
    }

    fn player_fields(&self) -> (bool, f64, RepeatMode, bool, usize) {
        (
            self.is_playing,
            self.volume,
            self.repeat,
            self.shuffle,
            self.queue_len,
        )
    }

    fn pomodoro_fields(&self) -> (TimerMode, u32, bool, u32) {
        (
            self.mode,
            self.time_remaining,
            self.is_running,
            self.completed_sessions,
        )
    }
}

/// Orchestration engine for Clique Lounge.
///
/// Encapsulates:
/// - TEA state management
/// - Message channel
/// - The mounted playback driver
/// - The Pomodoro ticker
/// - Event broadcasting for external consumers
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, stdin, backends).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    host: PlaybackHost,

    /// Running while the Pomodoro timer runs
    ticker: Option<PomodoroTicker>,

    /// Generation handed to the most recently spawned ticker
    ticker_generation: u64,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine {
    /// Create an Engine with fresh state on the guest identity.
    ///
    /// Must be called inside a tokio runtime (spawns the signal handler).
    pub fn new(
        store: Arc<dyn ConfigStore>,
        notifier: Arc<dyn Notifier>,
        backends: Backends,
    ) -> Self {
        Self::with_state(AppState::new(store, notifier), backends)
    }

    /// Create an Engine around prepared state (e.g. seeded shuffle)
    pub fn with_state(state: AppState, backends: Backends) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);

        signals::spawn_signal_handler(msg_tx.clone());

        let host = PlaybackHost::new(backends, msg_tx.clone());

        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            host,
            ticker: None,
            ticker_generation: 0,
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle, then bring the
    /// ticker in line with the timer and emit events for what changed.
    pub fn process_message(&mut self, msg: Message) {
        if let Message::PomodoroTick { ticker } = msg {
            if self.live_ticker() != Some(ticker) {
                trace!("Dropping tick from stopped ticker {}", ticker);
                return;
            }
        }

        let pre = StateSnapshot::capture(&self.state);

        process::process_message(&mut self.state, &mut self.host, msg);
        self.sync_ticker();

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn host(&self) -> &PlaybackHost {
        &self.host
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Generation of the running ticker, if any
    pub fn live_ticker(&self) -> Option<u64> {
        self.ticker.as_ref().map(PomodoroTicker::generation)
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop the ticker and unmount the playback driver.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.host.teardown();

        info!("Engine shut down");
    }

    /// Keep exactly one ticker alive while the timer runs
    fn sync_ticker(&mut self) {
        let running = self.state.pomodoro.state().is_running;
        match (running, self.ticker.take()) {
            (true, None) => {
                self.ticker_generation += 1;
                self.ticker = Some(PomodoroTicker::spawn(
                    self.msg_tx.clone(),
                    self.ticker_generation,
                ));
            }
            (true, Some(ticker)) => self.ticker = Some(ticker),
            (false, Some(ticker)) => ticker.stop(),
            (false, None) => {}
        }
    }

    /// Emit EngineEvents based on state changes after processing.
    fn emit_events(&mut self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.track_id != post.track_id {
            let track = self.state.player.state().current_track.clone();
            if let Some(track) = &track {
                info!("Now playing {} - {}", track.artist, track.name);
            }
            self.emit(EngineEvent::TrackChanged { track });
        }

        if pre.player_fields() != post.player_fields() {
            self.emit(EngineEvent::PlayerChanged {
                is_playing: post.is_playing,
                volume: post.volume,
                repeat: post.repeat,
                shuffle: post.shuffle,
                queue_len: post.queue_len,
            });
        }

        if pre.progress != post.progress || pre.duration != post.duration {
            self.emit(EngineEvent::ProgressChanged {
                progress: post.progress,
                duration: post.duration,
            });
        }

        if let Some(completion) = self.state.take_completion() {
            self.emit(EngineEvent::IntervalCompleted(completion));
        }

        if pre.pomodoro_fields() != post.pomodoro_fields() {
            self.emit(EngineEvent::PomodoroChanged {
                mode: post.mode,
                time_remaining: post.time_remaining,
                is_running: post.is_running,
                completed_sessions: post.completed_sessions,
            });
        }
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers.
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }
}
