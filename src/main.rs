//! voxnav - voice-driven browser automation assistant
//!
//! Main entry point for the voxnav CLI.

mod app;
mod cli;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

/// Get the .voxnav directory path.
fn voxnav_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".voxnav"))
        .unwrap_or_else(|| PathBuf::from(".voxnav"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.voxnav/logs/ with daily rotation; 30 files are kept.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = voxnav_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("voxnav")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Console output goes to stderr so `once` can print results on stdout.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // API keys may live in a .env file next to the config.
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Run) => app::run(&cli.config).await,
        Some(Commands::Once { text, json }) => app::once(&cli.config, &text.join(" "), json).await,
        Some(Commands::Check) => app::check(&cli.config),
    }
}
