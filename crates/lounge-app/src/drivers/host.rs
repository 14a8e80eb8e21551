//! Driver host - keeps exactly one driver mounted for the current track
//!
//! After every update the engine calls [`PlaybackHost::sync`] with the new
//! player state. The host:
//! - tears down the mounted driver when the current track (or its source)
//!   changed, then mounts a driver for the new one
//! - mirrors `is_playing` / `volume` into the mounted driver otherwise
//!
//! Each mount gets a fresh generation number. Driver events carry it, and
//! events from an older generation are dropped by [`PlaybackHost::accepts`].

use std::sync::Arc;

use lounge_core::prelude::*;
use lounge_core::{BackendEvent, DriverEvent, PlaybackSource};
use tokio::sync::mpsc;

use super::{
    AudioElement, DetachedAudio, DetachedEmbedded, EmbeddedPlayer, EmbeddedVideoDriver,
    NativeAudioDriver, PlaybackDriver,
};
use crate::message::Message;
use crate::player::PlayerState;

/// Imperative command for the mounted driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverCommand {
    Seek(f64),
    SetVolume(f64),
}

/// Handles to the two media surfaces
#[derive(Clone)]
pub struct Backends {
    pub audio: Arc<dyn AudioElement>,
    pub embedded: Arc<dyn EmbeddedPlayer>,
}

impl Backends {
    pub fn new(audio: Arc<dyn AudioElement>, embedded: Arc<dyn EmbeddedPlayer>) -> Self {
        Self { audio, embedded }
    }

    /// No media surface attached
    pub fn detached() -> Self {
        Self::new(Arc::new(DetachedAudio), Arc::new(DetachedEmbedded))
    }
}

struct ActiveDriver {
    generation: u64,
    track_id: String,
    driver: Box<dyn PlaybackDriver>,
    /// Last transport state pushed into the driver
    playing: bool,
    /// Last volume pushed into the driver
    volume: f64,
}

pub struct PlaybackHost {
    backends: Backends,
    msg_tx: mpsc::Sender<Message>,
    next_generation: u64,
    active: Option<ActiveDriver>,
}

impl PlaybackHost {
    pub fn new(backends: Backends, msg_tx: mpsc::Sender<Message>) -> Self {
        Self {
            backends,
            msg_tx,
            next_generation: 1,
            active: None,
        }
    }

    /// Generation of the mounted driver
    pub fn generation(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.generation)
    }

    /// Whether events stamped with `generation` come from the mounted driver
    pub fn accepts(&self, generation: u64) -> bool {
        self.generation() == Some(generation)
    }

    pub fn active_source(&self) -> Option<&PlaybackSource> {
        self.active.as_ref().map(|a| a.driver.source())
    }

    /// Bring the mounted driver in line with `state`
    pub fn sync(&mut self, state: &PlayerState) -> Vec<Message> {
        let desired = state
            .current_track
            .as_ref()
            .and_then(|t| t.source().map(|source| (t.id.as_str(), source)));

        let same = match (&self.active, &desired) {
            (Some(active), Some((id, source))) => {
                active.track_id == *id && active.driver.source() == source
            }
            (None, None) => true,
            _ => false,
        };

        if !same {
            self.teardown();
            return match desired {
                Some((id, source)) => self.mount(id.to_string(), source, state),
                None => Vec::new(),
            };
        }

        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };
        let generation = active.generation;
        let mut messages = Vec::new();

        if active.playing != state.is_playing {
            active.playing = state.is_playing;
            let result = if state.is_playing {
                active.driver.play()
            } else {
                active.driver.pause()
            };
            messages.extend(command_outcome(generation, result));
        }

        if active.volume != state.volume {
            active.volume = state.volume;
            let result = active.driver.set_volume(state.volume);
            messages.extend(command_outcome(generation, result));
        }

        messages
    }

    /// Apply an imperative command to the mounted driver (no-op when none)
    pub fn apply(&mut self, command: DriverCommand) -> Vec<Message> {
        let Some(active) = self.active.as_mut() else {
            trace!("No driver mounted, dropping {:?}", command);
            return Vec::new();
        };

        let result = match command {
            DriverCommand::Seek(seconds) => active.driver.seek(seconds),
            DriverCommand::SetVolume(volume) => {
                active.volume = volume;
                active.driver.set_volume(volume)
            }
        };
        command_outcome(active.generation, result).into_iter().collect()
    }

    /// Hand a raw backend event to the mounted driver
    pub fn route_backend_event(&mut self, event: &BackendEvent) -> Vec<Message> {
        let Some(active) = self.active.as_mut() else {
            trace!("No driver mounted, dropping {:?}", event);
            return Vec::new();
        };

        let generation = active.generation;
        active
            .driver
            .on_backend_event(event)
            .into_iter()
            .map(|event| Message::DriverEvent { generation, event })
            .collect()
    }

    pub fn teardown(&mut self) {
        if let Some(mut active) = self.active.take() {
            debug!(
                "Tearing down {} driver (generation {})",
                active.driver.source().backend_name(),
                active.generation
            );
            active.driver.teardown();
        }
    }

    fn mount(
        &mut self,
        track_id: String,
        source: PlaybackSource,
        state: &PlayerState,
    ) -> Vec<Message> {
        let generation = self.next_generation;
        self.next_generation += 1;

        let mut driver: Box<dyn PlaybackDriver> = match &source {
            PlaybackSource::Native(url) => {
                Box::new(NativeAudioDriver::new(url.clone(), self.backends.audio.clone()))
            }
            PlaybackSource::Embedded(video_id) => Box::new(EmbeddedVideoDriver::new(
                video_id.clone(),
                self.backends.embedded.clone(),
                generation,
                self.msg_tx.clone(),
            )),
        };

        info!(
            "Mounting {} driver for {} (generation {})",
            source.backend_name(),
            track_id,
            generation
        );
        let result = driver.mount(state.volume, state.is_playing);

        self.active = Some(ActiveDriver {
            generation,
            track_id,
            driver,
            playing: state.is_playing,
            volume: state.volume,
        });

        match result {
            Ok(()) => Vec::new(),
            Err(Error::PlaybackRejected { reason }) => vec![Message::DriverEvent {
                generation,
                event: DriverEvent::PlaybackRejected(reason),
            }],
            Err(Error::BackendNotReady { backend }) => {
                debug!("{} backend not ready at mount", backend);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to mount driver: {}", e);
                vec![Message::DriverEvent {
                    generation,
                    event: DriverEvent::Error(e.to_string()),
                }]
            }
        }
    }
}

impl Drop for PlaybackHost {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Turn a failed transport/volume/seek command into feedback for the player
fn command_outcome(generation: u64, result: Result<()>) -> Option<Message> {
    match result {
        Ok(()) => None,
        Err(Error::PlaybackRejected { reason }) => Some(Message::DriverEvent {
            generation,
            event: DriverEvent::PlaybackRejected(reason),
        }),
        Err(e) => {
            warn!("Driver command failed: {}", e);
            None
        }
    }
}
