//! ExportBlueprint - Config Loader output
//!
//! Describes one export job: the exporter options and the dispatcher sets to
//! render.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::DispatcherSet;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Exporter options
    pub exporter: ExporterConfig,

    /// Dispatcher sets, in export order
    #[serde(default)]
    pub sets: Vec<DispatcherSet>,
}

impl ExportBlueprint {
    /// Total number of endpoints across all sets
    pub fn endpoint_count(&self) -> usize {
        self.sets.iter().map(|s| s.endpoints.len()).sum()
    }
}

/// File exporter options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Destination file
    pub filename: PathBuf,

    /// Inline template source (empty = built-in default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Template file, relative to the configuration file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,

    /// How the destination is replaced
    #[serde(default)]
    pub write_mode: WriteMode,
}

/// Destination write strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Truncate the destination and stream the render into it
    #[default]
    Direct,
    /// Render into a sibling temporary file and rename it over the destination
    Atomic,
}
