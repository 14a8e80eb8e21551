//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Persistence Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Store error: {message}")]
    Store { message: String },

    // ─────────────────────────────────────────────────────────────
    // Playback Backend Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Playback backend not ready: {backend}")]
    BackendNotReady { backend: String },

    #[error("Playback rejected: {reason}")]
    PlaybackRejected { reason: String },

    #[error("Playback backend error: {message}")]
    Backend { message: String },

    // ─────────────────────────────────────────────────────────────
    // Collaborator Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Notification error: {message}")]
    Notification { message: String },

    #[error("Search error: {message}")]
    Search { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,

    // ─────────────────────────────────────────────────────────────
    // Process Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to install {signal} handler: {source}")]
    SignalSetup {
        signal: &'static str,
        #[source]
        source: std::io::Error,
    },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn backend_not_ready(backend: impl Into<String>) -> Self {
        Self::BackendNotReady {
            backend: backend.into(),
        }
    }

    pub fn playback_rejected(reason: impl Into<String>) -> Self {
        Self::PlaybackRejected {
            reason: reason.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    pub fn notification(message: impl Into<String>) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }

    pub fn search(message: impl Into<String>) -> Self {
        Self::Search {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    pub fn signal_setup(signal: &'static str, source: std::io::Error) -> Self {
        Self::SignalSetup { signal, source }
    }

    /// Check if this is a recoverable error
    ///
    /// Nothing in the state layer is fatal; this separates failures that a
    /// later command can fix from ones that need a different input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Store { .. }
                | Error::BackendNotReady { .. }
                | Error::PlaybackRejected { .. }
                | Error::Notification { .. }
                | Error::Search { .. }
                | Error::ChannelSend { .. }
                | Error::Io(_)
        )
    }

    /// Check if the failure is expected to clear up on its own
    /// (the next backend callback reconciles state).
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::BackendNotReady { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
