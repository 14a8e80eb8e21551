//! Playback controller - single source of truth for what is playing
//!
//! Organized into submodules:
//! - `state`: The `PlayerState` snapshot read by the UI
//! - `controller`: `PlaybackController` commands and queue navigation

mod controller;
mod state;


pub use controller::{PlaybackController, TrackEnd, RESTART_THRESHOLD_SECS};
pub use state::PlayerState;
