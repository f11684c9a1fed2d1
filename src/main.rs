//! ClassVault: terminal browser for a school's remote workspace.
//!
//! Wires configuration, logging, and the workspace browser together and
//! dispatches the requested command.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use classvault_core::config::AppConfig;

mod commands;
mod output;
mod picker;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::debug!(env = %cli.config, sandbox = cli.sandbox, "Configuration loaded");

    if let Err(e) = cli.execute(config).await {
        tracing::debug!(kind = %e.kind, status = ?e.status, "Command failed");
        output::report_error(&e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
///
/// Logs go to stderr so JSON command output stays parseable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
