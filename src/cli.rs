// CLI module - command-line argument parsing and handlers
//
// The bare command starts the TUI. A `config` subcommand mirrors the usual
// management flags:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};

/// Cipherdeck - terminal client for the cipher playground
#[derive(Parser)]
#[command(name = "cipherdeck")]
#[command(version = VERSION)]
#[command(about = "Terminal client for the cipher playground", long_about = None)]
pub struct Cli {
    /// Override the playground server URL for this run
    #[arg(long)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns the parsed args if the TUI should start,
/// None if a management command was handled (exit after).
pub fn handle_cli() -> Option<Cli> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path();
            } else if *show {
                handle_config_show();
            } else if *reset {
                handle_config_reset();
            } else {
                println!("Usage: cipherdeck config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            None
        }
        None => Some(cli),
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();
    print!("{}", config.to_toml());
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error: Could not create {}: {}", parent.display(), e);
            std::process::exit(1);
        }
    }
    match std::fs::write(&path, Config::default().to_toml()) {
        Ok(()) => println!("Reset {}", path.display()),
        Err(e) => {
            eprintln!("Error: Could not write {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
