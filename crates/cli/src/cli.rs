//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Dispatchers Export - render SIP dispatcher sets into a proxy routing table
#[derive(Parser, Debug)]
#[command(
    name = "dispatchers-export",
    author,
    version,
    about = "Export SIP dispatcher sets to a flat file",
    long_about = "Renders the dispatcher sets described in a configuration file into a \n\
                  flat file suitable for kamailio's dispatcher module, once or on a \n\
                  fixed interval."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "DISPATCHERS_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "DISPATCHERS_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the configured dispatcher sets
    Run(RunArgs),

    /// Validate configuration file and template without exporting
    Validate(ValidateArgs),

    /// Render the dispatcher sets to stdout
    Render(RenderArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "dispatchers.toml",
        env = "DISPATCHERS_CONFIG"
    )]
    pub config: PathBuf,

    /// Override the destination file from configuration
    #[arg(short, long, env = "DISPATCHERS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Replace the destination atomically (temporary file + rename)
    #[arg(long)]
    pub atomic: bool,

    /// Re-export every N seconds, reloading the sets each time (0 = export once)
    #[arg(long, default_value = "0", env = "DISPATCHERS_INTERVAL")]
    pub interval: u64,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "dispatchers.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `render` command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "dispatchers.toml")]
    pub config: PathBuf,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
