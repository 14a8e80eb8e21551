//! Logging configuration using tracing
//!
//! Stdout belongs to the headless NDJSON stream, so every log line goes to
//! a daily file under the data directory instead.

use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable holding filter directives
pub const LOG_ENV: &str = "LOUNGE_LOG";

/// Default directives: the state layer at info, with the once-per-second
/// ticker and progress poller held to warnings so a long focus session
/// does not fill the file with countdown noise
pub const DEFAULT_FILTER: &str =
    "clique_lounge=info,lounge_app=info,lounge_app::ticker=warn,lounge_app::drivers::embedded=warn,warn";

const LOG_FILE_PREFIX: &str = "lounge.log";

/// Initialize the logging subsystem
///
/// # Examples
/// ```bash
/// LOUNGE_LOG=debug lounge --start
/// LOUNGE_LOG=lounge_app::pomodoro=trace lounge --ephemeral
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let requested = std::env::var(LOG_ENV).ok();
    let directives = filter_directives(requested.as_deref());
    init_with(&log_dir, directives)?;

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("Clique Lounge starting (pid {})", std::process::id());
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("Filter: {}", directives);
    if requested.as_deref().is_some_and(|r| r.trim() != directives) {
        tracing::warn!("Ignoring unparsable {}; using defaults", LOG_ENV);
    }
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

fn init_with(log_dir: &Path, directives: &str) -> Result<()> {
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(EnvFilter::new(directives))
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    Ok(())
}

/// Pick the directives to run with: the requested ones when they parse,
/// the defaults otherwise
pub fn filter_directives(requested: Option<&str>) -> &str {
    match requested.map(str::trim) {
        Some(r) if !r.is_empty() && EnvFilter::try_new(r).is_ok() => r,
        _ => DEFAULT_FILTER,
    }
}

/// Base directory for everything the client keeps on disk
pub fn data_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("clique-lounge")
}

pub fn log_directory() -> PathBuf {
    data_directory().join("logs")
}
