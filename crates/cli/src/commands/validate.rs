//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::ExportBlueprint;
use exporter::{FileExporter, FileExporterConfig};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::error::CliError;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    destination: String,
    write_mode: String,
    template: &'static str,
    set_count: usize,
    endpoint_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        Err(CliError::validation_failed(result.config_path).into())
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return invalid(config_path, format!("File not found: {}", args.config.display()));
    }

    let blueprint = match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => blueprint,
        Err(e) => return invalid(config_path, e.to_string()),
    };

    // Compiling the template is the only way to know it is usable
    if let Err(e) = FileExporter::with_config(FileExporterConfig::from_exporter_config(
        &blueprint.exporter,
    )) {
        return invalid(config_path, e.to_string());
    }

    let warnings = collect_warnings(&blueprint);
    let custom_template = blueprint
        .exporter
        .template
        .as_deref()
        .is_some_and(|t| !t.is_empty());

    ValidationResult {
        valid: true,
        config_path,
        error: None,
        warnings: if warnings.is_empty() {
            None
        } else {
            Some(warnings)
        },
        summary: Some(ConfigSummary {
            version: format!("{:?}", blueprint.version),
            destination: blueprint.exporter.filename.display().to_string(),
            write_mode: format!("{:?}", blueprint.exporter.write_mode),
            template: if custom_template { "custom" } else { "default" },
            set_count: blueprint.sets.len(),
            endpoint_count: blueprint.endpoint_count(),
        }),
    }
}

fn invalid(config_path: String, error: String) -> ValidationResult {
    ValidationResult {
        valid: false,
        config_path,
        error: Some(error),
        warnings: None,
        summary: None,
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &ExportBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.sets.is_empty() {
        warnings.push("No dispatcher sets configured - only the header will be written".to_string());
    }

    for set in &blueprint.sets {
        if set.is_empty() {
            warnings.push(format!("Dispatcher set '{}' has no endpoints", set.id));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Destination: {}", summary.destination);
            println!("  Write mode: {}", summary.write_mode);
            println!("  Template: {}", summary.template);
            println!("  Sets: {}", summary.set_count);
            println!("  Endpoints: {}", summary.endpoint_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
