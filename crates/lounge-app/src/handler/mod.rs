//! Handler module - TEA update function
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `playback`: Playback and driver event handlers
//! - `pomodoro`: Pomodoro and identity handlers

pub(crate) mod playback;
pub(crate) mod pomodoro;
pub(crate) mod update;


use lounge_core::BackendEvent;

use crate::drivers::DriverCommand;
use crate::message::Message;

// Re-export main entry point
pub use update::update;

/// Actions that the engine should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Apply an imperative command to the mounted playback driver
    Driver(DriverCommand),

    /// Hand a raw backend event to the mounted driver for translation
    RouteBackendEvent(BackendEvent),
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the engine to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
