//! Gaze Overlay CLI - eye and iris overlay with coarse gaze-direction labels.

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{replay::ReplayArgs, Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = AppConfig::load();

    let exit_code = match cli.command {
        Some(Commands::Replay(args)) => replay(args, &config),
        Some(Commands::Config(ref args)) => match commands::config::run(args, &config) {
            Ok(()) => ExitCode::Success,
            Err(e) => {
                eprintln!("error: {e:#}");
                ExitCode::Error
            }
        },
        None => {
            // Default behavior: replay with flattened args
            if cli.replay.file.is_none() {
                eprintln!("error: No replay file specified. Use --help for usage information.");
                return ExitCode::Error.into();
            }
            replay(cli.replay, &config)
        }
    };

    exit_code.into()
}

fn replay(args: ReplayArgs, config: &AppConfig) -> ExitCode {
    let args = ReplayArgs::with_config(args, config);
    match commands::replay::run(&args) {
        Ok(result) => {
            info!(summary = ?result.summary, "Replay finished");
            result.exit_code
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error
        }
    }
}
