//! # lounge-core - Core Domain Types
//!
//! Foundation crate for Clique Lounge. Provides domain types, error handling,
//! playback backend event definitions and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, toml, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Track`] - A playable media item (native URL or embedded video id)
//! - [`PlaybackSource`] - Backend routing resolved from a track
//! - [`RepeatMode`] - Queue repeat behaviour (`off`, `all`, `one`)
//! - [`TimerMode`] - Pomodoro interval kind (`work`, `break`)
//! - [`StorageScope`] - Identity namespace for persisted records
//!
//! ### Events (`events`)
//! - [`BackendEvent`] - Raw events from the audio element or embedded player
//! - [`DriverEvent`] - Normalized events consumed by the playback controller
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with recoverable/transient classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use lounge_core::prelude::*;
//! ```

pub mod error;
pub mod events;
pub mod logging;
pub mod prelude;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use events::{AudioEvent, BackendEvent, DriverEvent, EmbeddedEvent, EmbeddedState};
pub use types::{PlaybackSource, RepeatMode, StorageScope, TimerMode, Track, MAX_FIXED_DURATION_SECS};
