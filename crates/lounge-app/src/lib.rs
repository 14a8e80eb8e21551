//! lounge-app - Client state layer for Clique Lounge
//!
//! This crate implements the playback and Pomodoro controllers, their
//! persistence, the playback drivers for both media backends, and the TEA
//! (The Elm Architecture) layer with the Engine that ties them together.

pub mod config;
pub mod drivers;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod message;
pub mod notify;
pub mod player;
pub mod pomodoro;
pub mod process;
pub mod search;
pub mod signals;
pub mod state;
pub mod ticker;

// Re-export primary types
pub use config::{ConfigStore, FileConfigStore, MemoryConfigStore};
pub use drivers::{Backends, DriverCommand, PlaybackHost};
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use notify::{DisabledNotifier, Notification, NotificationPermission, Notifier, TracingNotifier};
pub use player::{PlaybackController, PlayerState, TrackEnd};
pub use pomodoro::{IntervalCompletion, PomodoroController, PomodoroState, TickOutcome};
pub use search::{search_tracks, track_from_search_result, VideoSearch, VideoSearchResult};
pub use state::AppState;
pub use ticker::PomodoroTicker;
