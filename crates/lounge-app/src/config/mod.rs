//! Persistence for Clique Lounge client state
//!
//! Supports:
//! - `pomodoro-storage-<scope>` - Per-identity Pomodoro configuration and counters
//! - `recently-played-<scope>` - Per-identity recently played tracks
//! - `music-player-storage` - Player preferences (volume, repeat, shuffle)
//!
//! Records are TOML documents behind the [`ConfigStore`] port.

pub mod recent;
pub mod settings;
pub mod store;
pub mod types;

pub use recent::{load_recently_played, push_recent, record_recently_played, MAX_RECENTLY_PLAYED};
pub use settings::{
    load_player_preferences, load_pomodoro_record, save_player_preferences, save_pomodoro_patch,
    PLAYER_PREFERENCES_KEY, POMODORO_PREFIX, RECENTLY_PLAYED_PREFIX,
};
pub use store::{ConfigStore, FileConfigStore, MemoryConfigStore};
pub use types::*;

#[cfg(test)]
pub use store::MockConfigStore;
