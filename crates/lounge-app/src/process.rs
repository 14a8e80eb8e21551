//! Message processing with driver event routing
//!
//! Runs a message through the TEA update function, then lets the playback
//! host catch up with the new player state. Feedback produced along the way
//! (follow-up messages, driver events from commands or mounts) is processed
//! in the same cycle, in order.

use std::collections::VecDeque;

use lounge_core::prelude::*;

use crate::drivers::PlaybackHost;
use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::state::AppState;

/// Upper bound on messages processed for one incoming message.
///
/// A queue where every track fails to mount under repeat-all would
/// otherwise advance forever.
pub const MAX_CASCADE: usize = 64;

/// Process a message through the TEA update function
pub fn process_message(state: &mut AppState, host: &mut PlaybackHost, message: Message) {
    let mut pending = VecDeque::from([message]);
    let mut processed = 0;

    while let Some(msg) = pending.pop_front() {
        if processed == MAX_CASCADE {
            warn!(
                "Dropping {} follow-up messages after {} steps",
                pending.len() + 1,
                MAX_CASCADE
            );
            break;
        }
        processed += 1;

        if let Message::DriverEvent { generation, event } = &msg {
            if !host.accepts(*generation) {
                trace!("Dropping stale driver event {:?} (generation {})", event, generation);
                continue;
            }
        }

        let result = handler::update(state, msg);

        pending.extend(host.sync(state.player.state()));

        if let Some(action) = result.action {
            pending.extend(handle_action(action, host));
        }

        if let Some(follow_up) = result.message {
            pending.push_back(follow_up);
        }
    }
}

/// Execute an action against the playback host
fn handle_action(action: UpdateAction, host: &mut PlaybackHost) -> Vec<Message> {
    match action {
        UpdateAction::Driver(command) => host.apply(command),
        UpdateAction::RouteBackendEvent(event) => host.route_backend_event(&event),
    }
}
