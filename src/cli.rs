//! CLI definitions for voxnav.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// voxnav CLI.
#[derive(Parser)]
#[command(name = "voxnav")]
#[command(about = "Voice-driven browser automation assistant")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "voxnav.toml", global = true, env = "VOXNAV_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Listen for the wake word and run spoken commands (default)
    Run,

    /// Run a single typed command and exit
    Once {
        /// Command text, as it would have been spoken
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Print the full cycle report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration file
    Check,
}
