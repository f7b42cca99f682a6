//! `render` command implementation.

use std::io::Write;

use anyhow::{Context, Result};
use exporter::{FileExporter, FileExporterConfig};
use tracing::info;

use crate::cli::RenderArgs;
use crate::error::ensure_config_exists;

/// Execute the `render` command
///
/// Renders to stdout; the configured destination is left untouched.
pub fn run_render(args: &RenderArgs) -> Result<()> {
    info!(config = %args.config.display(), "Rendering dispatcher sets");

    ensure_config_exists(&args.config)?;

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let exporter = FileExporter::with_config(FileExporterConfig::from_exporter_config(
        &blueprint.exporter,
    ))
    .context("Failed to create exporter")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    exporter
        .render_to(&mut out, &blueprint.sets)
        .context("Failed to render dispatcher sets")?;
    out.flush().context("Failed to flush stdout")?;

    Ok(())
}
