//! Layered error definitions
//!
//! Categorized by source: config (loader side) / export (exporter side)

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error cause, used where the concrete error type belongs to a
/// backend crate (template engine, serializer)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ContractError {
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Export error type
///
/// Construction-time failures (`Config`, `TemplateParse`) are distinct from
/// per-call failures (`Open`, `Render`, `Close`).
#[derive(Debug, Error)]
pub enum ExportError {
    /// Invalid construction input
    #[error("config error: {message}")]
    Config { message: String },

    /// Template source failed to compile
    #[error("failed to parse export template{}: {source}", line_suffix(.line))]
    TemplateParse {
        line: Option<usize>,
        #[source]
        source: BoxError,
    },

    /// Destination could not be opened for writing
    #[error("failed to open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template execution failed (`path` is None when rendering to a caller's writer)
    #[error("{}: {source}", render_target(.path))]
    Render {
        path: Option<PathBuf>,
        #[source]
        source: BoxError,
    },

    /// Flushing or finalizing the destination failed after a complete render
    #[error("failed to finalize file {}: {source}", .path.display())]
    Close {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Export error category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorKind {
    Config,
    TemplateParse,
    Open,
    Render,
    Close,
}

impl ExportError {
    /// Create configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create template parse error
    pub fn template_parse(
        line: Option<usize>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::TemplateParse {
            line,
            source: source.into(),
        }
    }

    /// Create open error
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Create render error
    pub fn render(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::Render {
            path: Some(path.into()),
            source: source.into(),
        }
    }

    /// Create render error for output that is not the destination file
    pub fn render_preview(source: impl Into<BoxError>) -> Self {
        Self::Render {
            path: None,
            source: source.into(),
        }
    }

    /// Create close error
    pub fn close(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Close {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ExportErrorKind {
        match self {
            Self::Config { .. } => ExportErrorKind::Config,
            Self::TemplateParse { .. } => ExportErrorKind::TemplateParse,
            Self::Open { .. } => ExportErrorKind::Open,
            Self::Render { .. } => ExportErrorKind::Render,
            Self::Close { .. } => ExportErrorKind::Close,
        }
    }

    /// Whether the error happened while constructing the exporter
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self.kind(),
            ExportErrorKind::Config | ExportErrorKind::TemplateParse
        )
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

fn render_target(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("failed to write dispatchers to file {}", path.display()),
        None => "failed to render dispatchers".to_string(),
    }
}
