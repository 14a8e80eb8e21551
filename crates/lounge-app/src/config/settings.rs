//! Typed load/save helpers on top of [`ConfigStore`]
//!
//! Every helper here degrades instead of failing: unreadable or unparsable
//! records load as defaults, failed writes are dropped with a warning.

use lounge_core::prelude::*;
use lounge_core::StorageScope;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::store::ConfigStore;
use super::types::{PlayerPreferences, PomodoroRecord};

pub const POMODORO_PREFIX: &str = "pomodoro-storage";
pub const RECENTLY_PLAYED_PREFIX: &str = "recently-played";
pub const PLAYER_PREFERENCES_KEY: &str = "music-player-storage";

/// Read and parse a record; `Ok(None)` when the key was never written
pub(crate) fn read_record<T: DeserializeOwned>(
    store: &dyn ConfigStore,
    key: &str,
) -> Result<Option<T>> {
    match store.read(key)? {
        Some(content) => Ok(Some(toml::from_str(&content)?)),
        None => Ok(None),
    }
}

pub(crate) fn write_record<T: Serialize>(
    store: &dyn ConfigStore,
    key: &str,
    record: &T,
) -> Result<()> {
    let content = toml::to_string_pretty(record)?;
    store.write(key, &content)
}

/// Load a record, falling back to `T::default()` on any failure
pub(crate) fn load_or_default<T: DeserializeOwned + Default>(
    store: &dyn ConfigStore,
    key: &str,
) -> T {
    match read_record(store, key) {
        Ok(Some(record)) => {
            debug!("Loaded record {}", key);
            record
        }
        Ok(None) => {
            debug!("No record under {}, using defaults", key);
            T::default()
        }
        Err(e) => {
            warn!("Failed to load {}: {}", key, e);
            T::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pomodoro
// ─────────────────────────────────────────────────────────────────────────────

/// Load the Pomodoro record stored for `scope`
pub fn load_pomodoro_record(store: &dyn ConfigStore, scope: &StorageScope) -> PomodoroRecord {
    load_or_default(store, &scope.key(POMODORO_PREFIX))
}

/// Merge `patch` into the record stored for `scope`.
///
/// A stored record that cannot be read is treated as empty, so the patch
/// still lands.
pub fn save_pomodoro_patch(store: &dyn ConfigStore, scope: &StorageScope, patch: PomodoroRecord) {
    let key = scope.key(POMODORO_PREFIX);
    let existing: PomodoroRecord = match read_record(store, &key) {
        Ok(record) => record.unwrap_or_default(),
        Err(e) => {
            debug!("Ignoring unreadable record {}: {}", key, e);
            PomodoroRecord::default()
        }
    };

    if let Err(e) = write_record(store, &key, &existing.merge(patch)) {
        warn!("Failed to save {}: {}", key, e);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Player preferences
// ─────────────────────────────────────────────────────────────────────────────

pub fn load_player_preferences(store: &dyn ConfigStore) -> PlayerPreferences {
    let mut prefs: PlayerPreferences = load_or_default(store, PLAYER_PREFERENCES_KEY);
    prefs.volume = if prefs.volume.is_finite() {
        prefs.volume.clamp(0.0, 1.0)
    } else {
        PlayerPreferences::default().volume
    };
    prefs
}

pub fn save_player_preferences(store: &dyn ConfigStore, prefs: &PlayerPreferences) {
    if let Err(e) = write_record(store, PLAYER_PREFERENCES_KEY, prefs) {
        warn!("Failed to save {}: {}", PLAYER_PREFERENCES_KEY, e);
    }
}
