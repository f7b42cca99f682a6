//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Inline `template_path` into the exporter's template source
//! - Generate `ExportBlueprint`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("dispatchers.toml")).unwrap();
//! println!("Destination: {}", blueprint.exporter.filename.display());
//! ```

mod parser;
mod validator;

pub use contracts::ExportBlueprint;
pub use parser::ConfigFormat;

use contracts::ContractError;
use std::path::Path;
use tracing::debug;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    /// A relative `template_path` is resolved against the configuration
    /// file's directory and its content inlined into `exporter.template`.
    ///
    /// # Errors
    /// - File read failure (configuration or template)
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<ExportBlueprint, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        let mut blueprint = Self::load_from_str(&content, format)?;
        Self::inline_template(&mut blueprint, path.parent().unwrap_or(Path::new("")))?;
        Ok(blueprint)
    }

    /// Load configuration from string
    ///
    /// `template_path` is left untouched.
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ExportBlueprint, ContractError> {
        Self::parse_and_validate(content, format)
    }

    /// Serialize ExportBlueprint to TOML string
    pub fn to_toml(blueprint: &ExportBlueprint) -> Result<String, ContractError> {
        toml::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize ExportBlueprint to JSON string
    pub fn to_json(blueprint: &ExportBlueprint) -> Result<String, ContractError> {
        serde_json::to_string_pretty(blueprint)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ContractError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Parse and validate configuration content
    fn parse_and_validate(
        content: &str,
        format: ConfigFormat,
    ) -> Result<ExportBlueprint, ContractError> {
        let blueprint = parser::parse(content, format)?;
        validator::validate(&blueprint)?;
        Ok(blueprint)
    }

    /// Replace `template_path` with the template file content
    fn inline_template(blueprint: &mut ExportBlueprint, base: &Path) -> Result<(), ContractError> {
        let Some(template_path) = blueprint.exporter.template_path.take() else {
            return Ok(());
        };

        let resolved = base.join(&template_path);
        debug!(template = %resolved.display(), "Loading export template");
        let source = std::fs::read_to_string(&resolved).map_err(|e| {
            ContractError::ConfigParse {
                message: format!("cannot read template {}: {e}", resolved.display()),
                source: Some(Box::new(e)),
            }
        })?;
        blueprint.exporter.template = Some(source);
        Ok(())
    }
}
