//! Recently played list, per identity

use lounge_core::prelude::*;
use lounge_core::{StorageScope, Track};

use super::settings::{load_or_default, write_record, RECENTLY_PLAYED_PREFIX};
use super::store::ConfigStore;
use super::types::RecentlyPlayedFile;

pub const MAX_RECENTLY_PLAYED: usize = 10;

/// Put `track` at the front, dropping any earlier entry with the same id
pub fn push_recent(mut tracks: Vec<Track>, track: Track) -> Vec<Track> {
    tracks.retain(|t| t.id != track.id);
    tracks.insert(0, track);
    tracks.truncate(MAX_RECENTLY_PLAYED);
    tracks
}

pub fn load_recently_played(store: &dyn ConfigStore, scope: &StorageScope) -> Vec<Track> {
    let file: RecentlyPlayedFile = load_or_default(store, &scope.key(RECENTLY_PLAYED_PREFIX));
    let mut tracks = file.tracks;
    tracks.truncate(MAX_RECENTLY_PLAYED);
    tracks
}

/// Record a play and return the updated list (persist failures are logged)
pub fn record_recently_played(
    store: &dyn ConfigStore,
    scope: &StorageScope,
    track: Track,
) -> Vec<Track> {
    let tracks = push_recent(load_recently_played(store, scope), track);
    let key = scope.key(RECENTLY_PLAYED_PREFIX);
    let file = RecentlyPlayedFile {
        tracks: tracks.clone(),
    };
    if let Err(e) = write_record(store, &key, &file) {
        warn!("Failed to save {}: {}", key, e);
    }
    tracks
}
