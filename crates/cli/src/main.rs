//! # Dispatchers Export CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Configuration loading and validation
//! - One-shot and periodic export of dispatcher sets
//! - Graceful shutdown handling

mod cli;
mod commands;
mod error;
mod scheduler;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_export, run_render, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(observability_config(&cli))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Dispatchers export starting"
    );

    let result = match &cli.command {
        Commands::Run(args) => run_export(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Render(args) => run_render(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Map CLI logging flags onto the observability configuration
fn observability_config(cli: &Cli) -> ObservabilityConfig {
    let (level, force_level) = if cli.quiet {
        ("warn", true)
    } else {
        match cli.verbose {
            0 => ("info", false),
            1 => ("debug", false),
            _ => ("trace", false),
        }
    };

    ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: level.to_string(),
        force_level,
    }
}
