//! Backends for runs without a media surface (headless, tests)
//!
//! Loading a source succeeds; every other command reports
//! [`Error::BackendNotReady`], which drivers tolerate. The player state
//! machine runs unchanged and nothing is heard.

use lounge_core::prelude::*;

use super::{AudioElement, EmbeddedPlayer};

#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedAudio;

impl AudioElement for DetachedAudio {
    fn set_source(&self, url: &str) -> Result<()> {
        trace!("Detached audio: source {}", url);
        Ok(())
    }

    fn play(&self) -> Result<()> {
        Err(Error::backend_not_ready("native"))
    }

    fn pause(&self) -> Result<()> {
        Err(Error::backend_not_ready("native"))
    }

    fn set_current_time(&self, _seconds: f64) -> Result<()> {
        Err(Error::backend_not_ready("native"))
    }

    fn set_volume(&self, _volume: f64) -> Result<()> {
        Err(Error::backend_not_ready("native"))
    }
}

/// Embedded player that never becomes ready
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedEmbedded;

impl EmbeddedPlayer for DetachedEmbedded {
    fn load_video(&self, video_id: &str) -> Result<()> {
        trace!("Detached embedded player: video {}", video_id);
        Ok(())
    }

    fn play_video(&self) -> Result<()> {
        Err(Error::backend_not_ready("embedded"))
    }

    fn pause_video(&self) -> Result<()> {
        Err(Error::backend_not_ready("embedded"))
    }

    fn seek_to(&self, _seconds: f64) -> Result<()> {
        Err(Error::backend_not_ready("embedded"))
    }

    fn set_volume(&self, _volume: u8) -> Result<()> {
        Err(Error::backend_not_ready("embedded"))
    }

    fn duration(&self) -> Result<f64> {
        Err(Error::backend_not_ready("embedded"))
    }

    fn current_time(&self) -> Result<f64> {
        Err(Error::backend_not_ready("embedded"))
    }
}
