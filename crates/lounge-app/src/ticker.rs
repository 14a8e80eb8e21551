//! Pomodoro ticker
//!
//! A single tokio interval task feeding `Message::PomodoroTick` into the
//! engine once per second. The engine spawns it when the timer starts
//! running and stops it when the timer stops, so there is never more than
//! one live ticker. Each ticker carries a generation number so a tick that
//! was already queued when its ticker stopped can be told apart from one
//! sent by its replacement.

use std::time::Duration;

use lounge_core::prelude::*;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::message::Message;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to the running tick task
#[derive(Debug)]
pub struct PomodoroTicker {
    generation: u64,
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PomodoroTicker {
    /// Spawn the tick task. The first tick lands one interval after start;
    /// ticks missed while the runtime was busy are skipped, not replayed.
    pub fn spawn(msg_tx: mpsc::Sender<Message>, generation: u64) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + TICK_INTERVAL;
            let mut interval = tokio::time::interval_at(start, TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let tick = Message::PomodoroTick { ticker: generation };
                        if msg_tx.send(tick).await.is_err() {
                            break;
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("Pomodoro ticker {} stopped", generation);
        });

        debug!("Pomodoro ticker {} started", generation);
        Self {
            generation,
            shutdown_tx,
            handle,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        self.handle.abort();
    }
}
