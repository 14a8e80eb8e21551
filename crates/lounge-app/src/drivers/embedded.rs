//! Embedded video player driver
//!
//! The embedded player only accepts commands once it reported `Ready`, so
//! the driver remembers the requested transport/volume and applies them on
//! ready. While the player reports `Playing` a background poller samples the
//! position once per second and feeds it back as
//! `Message::DriverEvent { generation, .. }`.
//!
//! **Poller lifecycle:**
//! - Started on state `1` (playing), replacing any running poller
//! - Stopped on state `2` (paused) and `0` (ended), on error and on teardown
//! - Stopping signals the watch channel and aborts the `JoinHandle`

use std::sync::Arc;
use std::time::Duration;

use lounge_core::prelude::*;
use lounge_core::{BackendEvent, DriverEvent, EmbeddedEvent, EmbeddedState, PlaybackSource};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{tolerate_not_ready, EmbeddedPlayer, PlaybackDriver};
use crate::message::Message;

const BACKEND: &str = "embedded";

pub const PROGRESS_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct EmbeddedVideoDriver {
    source: PlaybackSource,
    video_id: String,
    player: Arc<dyn EmbeddedPlayer>,
    generation: u64,
    msg_tx: mpsc::Sender<Message>,
    mounted: bool,
    ready: bool,
    wants_play: bool,
    volume: f64,
    poller: Option<ProgressPoller>,
}

impl EmbeddedVideoDriver {
    pub fn new(
        video_id: impl Into<String>,
        player: Arc<dyn EmbeddedPlayer>,
        generation: u64,
        msg_tx: mpsc::Sender<Message>,
    ) -> Self {
        let video_id = video_id.into();
        Self {
            source: PlaybackSource::Embedded(video_id.clone()),
            video_id,
            player,
            generation,
            msg_tx,
            mounted: false,
            ready: false,
            wants_play: false,
            volume: 0.0,
            poller: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    fn apply_volume(&self) -> Result<()> {
        let scaled = (self.volume.clamp(0.0, 1.0) * 100.0).round() as u8;
        tolerate_not_ready(BACKEND, self.player.set_volume(scaled))
    }

    fn on_ready(&mut self) -> Vec<DriverEvent> {
        self.ready = true;
        debug!("Embedded player ready for {}", self.video_id);

        if let Err(e) = self.apply_volume() {
            debug!("Failed to apply volume on ready: {}", e);
        }

        let mut events = Vec::new();
        match self.player.duration() {
            Ok(duration) => events.push(DriverEvent::DurationKnown(duration)),
            Err(e) => debug!("Duration unavailable on ready: {}", e),
        }

        if self.wants_play {
            if let Err(e) = tolerate_not_ready(BACKEND, self.player.play_video()) {
                events.push(DriverEvent::Error(e.to_string()));
            }
        }
        events
    }

    fn start_poller(&mut self) {
        self.stop_poller();
        self.poller = Some(ProgressPoller::spawn(
            self.player.clone(),
            self.generation,
            self.msg_tx.clone(),
        ));
    }

    fn stop_poller(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
    }
}

impl PlaybackDriver for EmbeddedVideoDriver {
    fn source(&self) -> &PlaybackSource {
        &self.source
    }

    fn mount(&mut self, volume: f64, autoplay: bool) -> Result<()> {
        self.volume = volume;
        self.wants_play = autoplay;
        self.player.load_video(&self.video_id)?;
        self.mounted = true;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.wants_play = true;
        if !self.ready {
            return Ok(());
        }
        tolerate_not_ready(BACKEND, self.player.play_video())
    }

    fn pause(&mut self) -> Result<()> {
        self.wants_play = false;
        if !self.ready {
            return Ok(());
        }
        tolerate_not_ready(BACKEND, self.player.pause_video())
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        if !self.ready {
            debug!("Seek before embedded player is ready, ignoring");
            return Ok(());
        }
        tolerate_not_ready(BACKEND, self.player.seek_to(seconds.max(0.0)))
    }

    fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.volume = volume;
        if !self.ready {
            return Ok(());
        }
        self.apply_volume()
    }

    fn on_backend_event(&mut self, event: &BackendEvent) -> Vec<DriverEvent> {
        if !self.mounted {
            return Vec::new();
        }
        let BackendEvent::Embedded(event) = event else {
            return Vec::new();
        };

        match event {
            EmbeddedEvent::Ready => self.on_ready(),
            EmbeddedEvent::StateChange { code } => match EmbeddedState::from_code(*code) {
                Some(EmbeddedState::Playing) => {
                    self.start_poller();
                    Vec::new()
                }
                Some(EmbeddedState::Paused) => {
                    self.stop_poller();
                    Vec::new()
                }
                Some(EmbeddedState::Ended) => {
                    self.stop_poller();
                    vec![DriverEvent::Ended]
                }
                other => {
                    trace!("Ignoring embedded state {:?} (code {})", other, code);
                    Vec::new()
                }
            },
            EmbeddedEvent::Error { code } => {
                self.stop_poller();
                warn!("Embedded player error {} for {}", code, self.video_id);
                vec![DriverEvent::Error(format!("embedded player error {}", code))]
            }
        }
    }

    fn teardown(&mut self) {
        self.stop_poller();
        if !self.mounted {
            return;
        }
        self.mounted = false;
        if self.ready {
            if let Err(e) = self.player.pause_video() {
                debug!("Ignoring pause failure during teardown: {}", e);
            }
        }
        self.ready = false;
    }
}

impl Drop for EmbeddedVideoDriver {
    fn drop(&mut self) {
        self.stop_poller();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Progress poller
// ─────────────────────────────────────────────────────────────────────────────

struct ProgressPoller {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ProgressPoller {
    /// Spawn the sampling task. The first sample lands one interval after
    /// the player started playing.
    fn spawn(
        player: Arc<dyn EmbeddedPlayer>,
        generation: u64,
        msg_tx: mpsc::Sender<Message>,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + PROGRESS_POLL_INTERVAL;
            let mut interval = tokio::time::interval_at(start, PROGRESS_POLL_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let seconds = match player.current_time() {
                            Ok(seconds) => seconds,
                            Err(e) => {
                                trace!("Progress sample skipped: {}", e);
                                continue;
                            }
                        };
                        let msg = Message::DriverEvent {
                            generation,
                            event: DriverEvent::Progress(seconds),
                        };
                        if msg_tx.send(msg).await.is_err() {
                            // Engine is shutting down
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
            trace!("Progress poller for generation {} stopped", generation);
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::MockEmbeddedPlayer;

    fn player_at(seconds: f64) -> MockEmbeddedPlayer {
        let mut player = MockEmbeddedPlayer::new();
        player.expect_load_video().returning(|_| Ok(()));
        player.expect_set_volume().returning(|_| Ok(()));
        player.expect_play_video().returning(|| Ok(()));
        player.expect_pause_video().returning(|| Ok(()));
        player.expect_seek_to().returning(|_| Ok(()));
        player.expect_duration().returning(|| Ok(240.0));
        player.expect_current_time().returning(move || Ok(seconds));
        player
    }

    fn driver(player: MockEmbeddedPlayer) -> (EmbeddedVideoDriver, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(16);
        (EmbeddedVideoDriver::new("vid", Arc::new(player), 3, tx), rx)
    }

    fn state(code: i32) -> BackendEvent {
        BackendEvent::Embedded(EmbeddedEvent::StateChange { code })
    }

    #[test]
    fn test_commands_before_ready_are_deferred() {
        let mut player = MockEmbeddedPlayer::new();
        player.expect_load_video().times(1).returning(|_| Ok(()));
        player.expect_play_video().times(0);
        player.expect_seek_to().times(0);
        player.expect_set_volume().times(0);
        let (mut driver, _rx) = driver(player);

        driver.mount(0.5, false).unwrap();
        driver.play().unwrap();
        driver.seek(30.0).unwrap();
        driver.set_volume(0.3).unwrap();

        assert!(!driver.is_ready());
    }

    #[test]
    fn test_ready_reports_duration_and_applies_pending_state() {
        let mut player = MockEmbeddedPlayer::new();
        player.expect_load_video().returning(|_| Ok(()));
        player
            .expect_set_volume()
            .withf(|v| *v == 40)
            .times(1)
            .returning(|_| Ok(()));
        player.expect_duration().returning(|| Ok(215.0));
        player.expect_play_video().times(1).returning(|| Ok(()));
        let (mut driver, _rx) = driver(player);

        driver.mount(0.4, true).unwrap();
        let events = driver.on_backend_event(&BackendEvent::Embedded(EmbeddedEvent::Ready));

        assert_eq!(events, vec![DriverEvent::DurationKnown(215.0)]);
        assert!(driver.is_ready());
    }

    #[test]
    fn test_error_event_reports_error() {
        let (mut driver, _rx) = driver(player_at(0.0));
        driver.mount(0.7, false).unwrap();

        let events =
            driver.on_backend_event(&BackendEvent::Embedded(EmbeddedEvent::Error { code: 150 }));

        assert!(matches!(events.as_slice(), [DriverEvent::Error(_)]));
    }

    #[test]
    fn test_audio_events_are_ignored() {
        let (mut driver, _rx) = driver(player_at(0.0));
        driver.mount(0.7, false).unwrap();
        assert!(driver
            .on_backend_event(&BackendEvent::Audio(lounge_core::AudioEvent::Ended))
            .is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_runs_while_playing() {
        let (mut driver, mut rx) = driver(player_at(42.0));
        driver.mount(0.7, true).unwrap();
        driver.on_backend_event(&BackendEvent::Embedded(EmbeddedEvent::Ready));

        driver.on_backend_event(&state(1));
        assert!(driver.is_polling());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let msg = rx.recv().await.unwrap();
        assert_eq!(
            msg,
            Message::DriverEvent {
                generation: 3,
                event: DriverEvent::Progress(42.0)
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_poller() {
        let (mut driver, mut rx) = driver(player_at(10.0));
        driver.mount(0.7, true).unwrap();
        driver.on_backend_event(&BackendEvent::Embedded(EmbeddedEvent::Ready));
        driver.on_backend_event(&state(1));

        driver.on_backend_event(&state(2));
        assert!(!driver.is_polling());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ended_stops_poller_and_reports_end() {
        let (mut driver, mut rx) = driver(player_at(10.0));
        driver.mount(0.7, true).unwrap();
        driver.on_backend_event(&BackendEvent::Embedded(EmbeddedEvent::Ready));
        driver.on_backend_event(&state(1));

        let events = driver.on_backend_event(&state(0));

        assert_eq!(events, vec![DriverEvent::Ended]);
        assert!(!driver.is_polling());
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_leaves_no_timer() {
        let (mut driver, mut rx) = driver(player_at(10.0));
        driver.mount(0.7, true).unwrap();
        driver.on_backend_event(&BackendEvent::Embedded(EmbeddedEvent::Ready));
        driver.on_backend_event(&state(1));

        driver.teardown();

        assert!(!driver.is_polling());
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
        assert!(driver.on_backend_event(&state(0)).is_empty());
    }
}
