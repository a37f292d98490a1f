//! CLI command definitions and handlers.

pub mod config;
pub mod replay;

use clap::{Parser, Subcommand};

/// Gaze Overlay - Eye and iris overlay with coarse gaze-direction labels
#[derive(Parser)]
#[command(name = "gaze-overlay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared replay arguments (file, frame size, thresholds, flags).
    #[command(flatten)]
    pub replay: replay::ReplayArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Replay recorded detector output through the overlay pipeline
    Replay(replay::ReplayArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// All frames were processed.
    Success = 0,
    /// The detector failed on at least one frame.
    DetectionFailed = 1,
    /// The command could not run.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
