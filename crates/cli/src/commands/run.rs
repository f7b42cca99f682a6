//! `run` command implementation.

use anyhow::{Context, Result};
use contracts::{ExportBlueprint, WriteMode};
use exporter::{FileExporter, FileExporterConfig};
use std::time::Duration;
use tracing::info;

use crate::cli::RunArgs;
use crate::error::ensure_config_exists;
use crate::scheduler::{ExportScheduler, SchedulerConfig};

/// Execute the `run` command
pub async fn run_export(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    ensure_config_exists(&args.config)?;

    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    apply_overrides(&mut blueprint, args);

    info!(
        destination = %blueprint.exporter.filename.display(),
        write_mode = ?blueprint.exporter.write_mode,
        sets = blueprint.sets.len(),
        endpoints = blueprint.endpoint_count(),
        "Configuration loaded"
    );

    let exporter = FileExporter::with_config(FileExporterConfig::from_exporter_config(
        &blueprint.exporter,
    ))
    .context("Failed to create exporter")?;

    let scheduler = ExportScheduler::new(
        SchedulerConfig {
            config_path: args.config.clone(),
            interval: if args.interval == 0 {
                None
            } else {
                Some(Duration::from_secs(args.interval))
            },
        },
        exporter,
    );

    let stats = scheduler
        .run(blueprint.sets)
        .await
        .context("Export failed")?;

    if args.interval > 0 {
        stats.print_summary();
    }

    info!(
        exports = stats.attempts(),
        failed = stats.exports_failed,
        "Dispatchers export finished"
    );
    Ok(())
}

/// Apply CLI overrides on top of the loaded configuration
fn apply_overrides(blueprint: &mut ExportBlueprint, args: &RunArgs) {
    if let Some(ref output) = args.output {
        info!(output = %output.display(), "Overriding destination from CLI");
        blueprint.exporter.filename = output.clone();
    }
    if args.atomic {
        blueprint.exporter.write_mode = WriteMode::Atomic;
    }
}
