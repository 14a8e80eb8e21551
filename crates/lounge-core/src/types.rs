//! Core domain types for playback and focus sessions

use serde::{Deserialize, Serialize};

/// Track lengths above a day are treated as live streams
pub const MAX_FIXED_DURATION_SECS: u32 = 86_400;

// ─────────────────────────────────────────────────────────────────────────────
// Tracks
// ─────────────────────────────────────────────────────────────────────────────

/// A playable media item.
///
/// Exactly one of `audio_url` / `youtube_id` is expected to be set; the pair
/// decides which backend plays it (see [`Track::source`]). A track with
/// neither is accepted everywhere but never produces sound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Seconds. `0` or anything above [`MAX_FIXED_DURATION_SECS`] means live.
    #[serde(default)]
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_id: Option<String>,
}

impl Track {
    /// Create a track with no playable reference attached
    pub fn new(id: impl Into<String>, name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: artist.into(),
            album: None,
            duration: 0,
            cover_url: None,
            audio_url: None,
            youtube_id: None,
        }
    }

    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    pub fn with_youtube_id(mut self, video_id: impl Into<String>) -> Self {
        self.youtube_id = Some(video_id.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_cover_url(mut self, url: impl Into<String>) -> Self {
        self.cover_url = Some(url.into());
        self
    }

    /// Whether the track has no fixed end (live stream or unknown length)
    pub fn is_live(&self) -> bool {
        self.duration == 0 || self.duration > MAX_FIXED_DURATION_SECS
    }

    /// Resolve the playback backend for this track.
    ///
    /// Embedded only when a video id is present and no direct media URL is;
    /// a direct URL always wins. `None` means the track is unplayable.
    pub fn source(&self) -> Option<PlaybackSource> {
        match (&self.audio_url, &self.youtube_id) {
            (Some(url), _) if !url.is_empty() => Some(PlaybackSource::Native(url.clone())),
            (_, Some(id)) if !id.is_empty() => Some(PlaybackSource::Embedded(id.clone())),
            _ => None,
        }
    }

    pub fn is_playable(&self) -> bool {
        self.source().is_some()
    }
}

/// Which backend renders a track, resolved once per track
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ref", rename_all = "snake_case")]
pub enum PlaybackSource {
    /// Direct media URL played by the native audio element
    Native(String),
    /// Video identifier played by the embedded video platform
    Embedded(String),
}

impl PlaybackSource {
    pub fn backend_name(&self) -> &'static str {
        match self {
            PlaybackSource::Native(_) => "native",
            PlaybackSource::Embedded(_) => "embedded",
        }
    }
}

/// Queue repeat behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    All,
    One,
}

impl RepeatMode {
    /// Next mode in the `off → all → one → off` cycle
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

impl std::fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepeatMode::Off => write!(f, "off"),
            RepeatMode::All => write!(f, "all"),
            RepeatMode::One => write!(f, "one"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Focus sessions
// ─────────────────────────────────────────────────────────────────────────────

/// Pomodoro interval kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Work,
    Break,
}

impl TimerMode {
    pub fn flipped(self) -> Self {
        match self {
            TimerMode::Work => TimerMode::Break,
            TimerMode::Break => TimerMode::Work,
        }
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerMode::Work => write!(f, "work"),
            TimerMode::Break => write!(f, "break"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity scope
// ─────────────────────────────────────────────────────────────────────────────

/// Namespace under which per-identity records are persisted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum StorageScope {
    /// Anonymous visitor
    #[default]
    Guest,
    /// Signed-in identity
    User(String),
}

impl StorageScope {
    pub fn from_user_id(user_id: Option<&str>) -> Self {
        match user_id {
            Some(id) if !id.is_empty() => StorageScope::User(id.to_string()),
            _ => StorageScope::Guest,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            StorageScope::Guest => None,
            StorageScope::User(id) => Some(id),
        }
    }

    /// Build the storage key for a record family, e.g. `pomodoro-storage-guest`.
    ///
    /// User ids are reduced to `[A-Za-z0-9_-]` so the key is safe to use as a
    /// file name.
    pub fn key(&self, prefix: &str) -> String {
        match self {
            StorageScope::Guest => format!("{}-guest", prefix),
            StorageScope::User(id) => {
                let safe: String = id
                    .chars()
                    .map(|c| {
                        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                            c
                        } else {
                            '_'
                        }
                    })
                    .collect();
                format!("{}-{}", prefix, safe)
            }
        }
    }
}
