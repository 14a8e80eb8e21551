//! Native audio element driver

use std::sync::Arc;

use lounge_core::prelude::*;
use lounge_core::{AudioEvent, BackendEvent, DriverEvent, PlaybackSource};

use super::{tolerate_not_ready, AudioElement, PlaybackDriver};

const BACKEND: &str = "native";

pub struct NativeAudioDriver {
    source: PlaybackSource,
    url: String,
    element: Arc<dyn AudioElement>,
    mounted: bool,
}

impl NativeAudioDriver {
    pub fn new(url: impl Into<String>, element: Arc<dyn AudioElement>) -> Self {
        let url = url.into();
        Self {
            source: PlaybackSource::Native(url.clone()),
            url,
            element,
            mounted: false,
        }
    }
}

impl PlaybackDriver for NativeAudioDriver {
    fn source(&self) -> &PlaybackSource {
        &self.source
    }

    fn mount(&mut self, volume: f64, autoplay: bool) -> Result<()> {
        self.element.set_source(&self.url)?;
        self.mounted = true;
        self.set_volume(volume)?;
        if autoplay {
            self.play()?;
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        match self.element.play() {
            Err(Error::PlaybackRejected { reason }) => {
                warn!("Audio element refused to play: {}", reason);
                Err(Error::playback_rejected(reason))
            }
            other => tolerate_not_ready(BACKEND, other),
        }
    }

    fn pause(&mut self) -> Result<()> {
        tolerate_not_ready(BACKEND, self.element.pause())
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        tolerate_not_ready(BACKEND, self.element.set_current_time(seconds.max(0.0)))
    }

    fn set_volume(&mut self, volume: f64) -> Result<()> {
        tolerate_not_ready(BACKEND, self.element.set_volume(volume.clamp(0.0, 1.0)))
    }

    fn on_backend_event(&mut self, event: &BackendEvent) -> Vec<DriverEvent> {
        if !self.mounted {
            return Vec::new();
        }
        match event {
            BackendEvent::Audio(AudioEvent::TimeUpdate { current_time }) => {
                vec![DriverEvent::Progress(*current_time)]
            }
            BackendEvent::Audio(AudioEvent::LoadedMetadata { duration }) => {
                vec![DriverEvent::DurationKnown(*duration)]
            }
            BackendEvent::Audio(AudioEvent::Ended) => vec![DriverEvent::Ended],
            BackendEvent::Embedded(_) => Vec::new(),
        }
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if let Err(e) = self.element.pause() {
            debug!("Ignoring pause failure during teardown: {}", e);
        }
    }
}
