//! Clique Lounge - playback and Pomodoro state layer, driven from the terminal
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use clique_lounge::{run_headless, HeadlessOptions};

/// Clique Lounge - focus timer and player state, headless
#[derive(Parser, Debug)]
#[command(name = "lounge")]
#[command(about = "Run the Clique Lounge Pomodoro timer headless (NDJSON on stdout)", long_about = None)]
struct Args {
    /// Signed-in user id (records are kept per user; guest when omitted)
    #[arg(long, value_name = "ID")]
    user: Option<String>,

    /// Directory for persisted records
    #[arg(long, value_name = "PATH", conflicts_with = "ephemeral")]
    data_dir: Option<PathBuf>,

    /// Keep records in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Work interval length in minutes
    #[arg(long, value_name = "MIN")]
    work: Option<u32>,

    /// Short break length in minutes
    #[arg(long = "break", value_name = "MIN")]
    short_break: Option<u32>,

    /// Long break length in minutes
    #[arg(long, value_name = "MIN")]
    long_break: Option<u32>,

    /// Start the timer immediately
    #[arg(long)]
    start: bool,
}

impl From<Args> for HeadlessOptions {
    fn from(args: Args) -> Self {
        Self {
            user: args.user,
            data_dir: args.data_dir,
            ephemeral: args.ephemeral,
            work: args.work,
            short_break: args.short_break,
            long_break: args.long_break,
            start: args.start,
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to file; stdout carries the NDJSON stream
    lounge_core::logging::init()?;

    let result = run_headless(args.into()).await;
    if let Err(ref e) = result {
        tracing::error!("Application error: {:?}", e);
    }
    Ok(result?)
}
