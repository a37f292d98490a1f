//! Config command - inspect layered configuration.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::config::{find_project_config, xdg_config_path, AppConfig};

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the merged configuration from all config files
    Show,
    /// Print the config file locations that are searched
    Path,
}

/// Run the config command.
pub fn run(args: &ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(config),
        ConfigCommand::Path => {
            print_paths();
            Ok(())
        }
    }
}

fn show(config: &AppConfig) -> Result<()> {
    let text = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    print!("{text}");
    Ok(())
}

fn print_paths() {
    match xdg_config_path() {
        Some(path) => {
            let state = if path.exists() { "found" } else { "missing" };
            println!("user:    {} ({state})", path.display());
        }
        None => println!("user:    (no config directory)"),
    }

    match find_project_config() {
        Some(path) => println!("project: {} (found)", path.display()),
        None => println!("project: (none)"),
    }
}
