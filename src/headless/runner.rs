//! Headless mode runner - main event loop without a UI
//!
//! Stdin lines become engine messages; engine events become NDJSON on
//! stdout. Playback runs against detached backends.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use lounge_app::{
    Backends, ConfigStore, Engine, EngineEvent, FileConfigStore, MemoryConfigStore, Message,
    TracingNotifier,
};
use lounge_core::prelude::*;

use super::HeadlessEvent;

/// Startup options for the headless runner
#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    /// Signed-in identity; guest when absent
    pub user: Option<String>,
    /// Store directory; the per-user data directory when absent
    pub data_dir: Option<PathBuf>,
    /// Keep every record in memory for this run only
    pub ephemeral: bool,
    /// Minutes
    pub work: Option<u32>,
    /// Minutes
    pub short_break: Option<u32>,
    /// Minutes
    pub long_break: Option<u32>,
    /// Start the timer immediately
    pub start: bool,
}

/// A parsed stdin line
#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessInput {
    /// Forward to the engine
    Command(Message),
    /// Print a full state snapshot
    Status,
    /// Nothing to do (blank line)
    Empty,
    Unknown(String),
}

/// Parse one stdin line
pub fn parse_input(line: &str) -> HeadlessInput {
    let trimmed = line.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command {
        "" => HeadlessInput::Empty,
        "start" | "s" => HeadlessInput::Command(Message::PomodoroStart),
        "pause" | "p" => HeadlessInput::Command(Message::PomodoroPause),
        "reset" => HeadlessInput::Command(Message::PomodoroReset),
        "skip" => HeadlessInput::Command(Message::PomodoroSkip),
        "task" => HeadlessInput::Command(Message::SetTask(rest.to_string())),
        "status" => HeadlessInput::Status,
        "q" | "quit" => HeadlessInput::Command(Message::Quit),
        _ => HeadlessInput::Unknown(trimmed.to_string()),
    }
}

/// Run in headless mode - output JSON events instead of a UI
pub async fn run_headless(options: HeadlessOptions) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Clique Lounge starting in HEADLESS mode");
    info!("Identity: {}", options.user.as_deref().unwrap_or("guest"));
    info!("═══════════════════════════════════════════════════════");

    let store = open_store(&options);
    let mut engine = Engine::new(store, Arc::new(TracingNotifier), Backends::detached());

    apply_startup_options(&mut engine, &options);
    HeadlessEvent::pomodoro_state(engine.state.pomodoro.state()).emit();

    let mut events = engine.subscribe();

    let (input_tx, input_rx) = mpsc::channel::<HeadlessInput>(32);
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(input_tx);
    });

    let result = headless_event_loop(&mut engine, input_rx, &mut events).await;

    engine.shutdown().await;

    info!("Clique Lounge headless mode exiting");
    result
}

fn open_store(options: &HeadlessOptions) -> Arc<dyn ConfigStore> {
    if options.ephemeral {
        info!("Using in-memory store");
        return Arc::new(MemoryConfigStore::new());
    }

    let store = match &options.data_dir {
        Some(dir) => FileConfigStore::new(dir.clone()),
        None => FileConfigStore::default_location(),
    };
    info!("Store directory: {}", store.root().display());
    Arc::new(store)
}

/// Resolve identity and apply duration overrides before the first event
fn apply_startup_options(engine: &mut Engine, options: &HeadlessOptions) {
    engine.process_message(Message::UserResolved(options.user.clone()));

    if let Some(minutes) = options.work {
        engine.process_message(Message::SetWorkDuration(minutes));
    }
    if let Some(minutes) = options.short_break {
        engine.process_message(Message::SetBreakDuration(minutes));
    }
    if let Some(minutes) = options.long_break {
        engine.process_message(Message::SetLongBreakDuration(minutes));
    }
    if options.start {
        engine.process_message(Message::PomodoroStart);
    }
}

/// Main headless event loop
async fn headless_event_loop(
    engine: &mut Engine,
    mut input_rx: mpsc::Receiver<HeadlessInput>,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    let mut stdin_open = true;

    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        tokio::select! {
            msg = engine.msg_rx.recv() => match msg {
                Some(msg) => engine.process_message(msg),
                None => {
                    info!("Message channel closed");
                    break;
                }
            },
            input = input_rx.recv(), if stdin_open => match input {
                Some(input) => handle_input(engine, input),
                None => {
                    debug!("Stdin closed; running until quit");
                    stdin_open = false;
                }
            },
        }

        emit_engine_events(events);
    }

    Ok(())
}

fn handle_input(engine: &mut Engine, input: HeadlessInput) {
    match input {
        HeadlessInput::Command(msg) => engine.process_message(msg),
        HeadlessInput::Status => {
            HeadlessEvent::pomodoro_state(engine.state.pomodoro.state()).emit();
        }
        HeadlessInput::Empty => {}
        HeadlessInput::Unknown(line) => {
            warn!("Unknown stdin command: {}", line);
            HeadlessEvent::error(format!("Unknown command: {}", line)).emit();
        }
    }
}

/// Forward everything the engine broadcast since the last call
fn emit_engine_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                if let Some(headless) = HeadlessEvent::from_engine_event(&event) {
                    headless.emit();
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events skipped", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Read stdin lines and forward them to the event loop (blocking version)
fn spawn_stdin_reader_blocking(input_tx: mpsc::Sender<HeadlessInput>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        match line {
            Ok(line) => {
                let input = parse_input(&line);
                let quit = input == HeadlessInput::Command(Message::Quit);
                if input_tx.blocking_send(input).is_err() || quit {
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin reader exiting");
}
