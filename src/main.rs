// Cipherdeck - terminal client for the cipher playground
//
// Architecture:
// - Client (reqwest): talks to the playground's HTTP API
// - Session: owns selection state and the operation state machine
// - Form builder: schema-driven parameter rendering and collection
// - TUI (ratatui): draws the session and routes user input
// - Logging: captured in memory so the alternate screen stays clean

mod cli;
mod client;
mod config;
mod form;
mod logging;
mod render;
mod schema;
mod session;
mod tui;
mod util;

use anyhow::Result;
use client::ApiClient;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle management commands first (config --show/--path/--reset);
    // exit early when one was handled
    let Some(args) = cli::handle_cli() else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let Some(server) = args.server {
        config.server_url = server;
    }

    // Capture logs in memory so they never garble the TUI; optionally also
    // write JSON log files with rotation.
    //
    // Precedence: RUST_LOG env var > config file > default "info"
    let log_buffer = LogBuffer::new();
    let default_filter = format!("cipherdeck={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must stay alive for the program's duration so logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Ok(()) => {
                    let file_appender = match config.logging.file_rotation {
                        LogRotation::Hourly => tracing_appender::rolling::hourly(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Daily => tracing_appender::rolling::daily(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                        LogRotation::Never => tracing_appender::rolling::never(
                            &config.logging.file_dir,
                            &config.logging.file_prefix,
                        ),
                    };
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                    Some(guard)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Could not create log directory {:?}: {}",
                        config.logging.file_dir, e
                    );
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    tracing::info!("Connecting to playground at {}", config.server_url);

    let client = ApiClient::new(config.server_url.clone());

    if let Err(e) = tui::run_tui(client, log_buffer).await {
        tracing::error!("TUI error: {:?}", e);
        return Err(e);
    }

    Ok(())
}
