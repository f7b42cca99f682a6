//! FileExporter - renders dispatcher sets into a flat file

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use contracts::{DispatcherSet, ExportError, Exporter, ExporterConfig, WriteMode};
use tempfile::Builder;
use tracing::{debug, instrument};

use crate::template::CompiledTemplate;

/// Configuration for FileExporter
#[derive(Debug, Clone, Default)]
pub struct FileExporterConfig {
    /// Destination file
    pub filename: PathBuf,
    /// Template source (empty = built-in default)
    pub template: String,
    /// How the destination is replaced
    pub write_mode: WriteMode,
}

impl FileExporterConfig {
    pub fn new(filename: impl Into<PathBuf>, template: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            template: template.into(),
            write_mode: WriteMode::Direct,
        }
    }

    /// Build from the loaded blueprint section
    ///
    /// `template_path` must already have been inlined by the config loader.
    pub fn from_exporter_config(config: &ExporterConfig) -> Self {
        Self {
            filename: config.filename.clone(),
            template: config.template.clone().unwrap_or_default(),
            write_mode: config.write_mode,
        }
    }
}

/// Exporter that writes formatted dispatcher set data to a file
///
/// The template is compiled once in the constructor; every `export` call
/// re-renders the full snapshot and replaces the file contents.
pub struct FileExporter {
    path: PathBuf,
    write_mode: WriteMode,
    template: CompiledTemplate,
}

impl FileExporter {
    /// Create a new FileExporter writing directly to `filename`
    ///
    /// An empty `template` selects [`DEFAULT_TEMPLATE`](crate::DEFAULT_TEMPLATE),
    /// which is compatible with kamailio's dispatcher module as a flat file
    /// source.
    ///
    /// # Errors
    /// - `ExportError::Config` if `filename` is empty
    /// - `ExportError::TemplateParse` if the template does not compile
    pub fn new(filename: impl Into<PathBuf>, template: &str) -> Result<Self, ExportError> {
        Self::with_config(FileExporterConfig::new(filename, template))
    }

    /// Create from a full configuration
    #[instrument(
        name = "file_exporter_new",
        skip(config),
        fields(path = %config.filename.display(), write_mode = ?config.write_mode)
    )]
    pub fn with_config(config: FileExporterConfig) -> Result<Self, ExportError> {
        if config.filename.as_os_str().is_empty() {
            return Err(ExportError::config("empty filename"));
        }

        let template = CompiledTemplate::compile(&config.template)?;
        debug!(custom_template = !config.template.is_empty(), "Export template compiled");

        Ok(Self {
            path: config.filename,
            write_mode: config.write_mode,
            template,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Source of the compiled template (the default one if none was given)
    pub fn template_source(&self) -> &str {
        self.template.source()
    }

    /// Render `sets` into an arbitrary writer without touching the destination
    ///
    /// # Errors
    /// Returns `ExportError::Render` (without a destination path) if template
    /// execution or a write fails
    pub fn render_to<W: Write>(&self, writer: W, sets: &[DispatcherSet]) -> Result<(), ExportError> {
        self.template
            .render_to(sets, writer)
            .map_err(ExportError::render_preview)
    }

    fn render_into<W: Write>(&self, writer: W, sets: &[DispatcherSet]) -> Result<(), ExportError> {
        self.template
            .render_to(sets, writer)
            .map_err(|e| ExportError::render(&self.path, e))
    }

    fn export_direct(&self, sets: &[DispatcherSet]) -> Result<(), ExportError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| ExportError::open(&self.path, e))?;

        // the writer owns the handle; dropping it on any early return is the only release
        let mut writer = BufWriter::new(file);
        self.render_into(&mut writer, sets)?;

        let file = writer
            .into_inner()
            .map_err(|e| ExportError::close(&self.path, e.into_error()))?;
        file.sync_all()
            .map_err(|e| ExportError::close(&self.path, e))
    }

    fn export_atomic(&self, sets: &[DispatcherSet]) -> Result<(), ExportError> {
        if self.path.is_dir() {
            return Err(ExportError::open(
                &self.path,
                io::Error::other("destination is a directory"),
            ));
        }

        let existing = fs::metadata(&self.path).ok().map(|meta| meta.permissions());
        let mut builder = Builder::new();
        if existing.is_none() {
            new_file_permissions(&mut builder);
        }
        let tmp = builder
            .tempfile_in(self.parent_dir())
            .map_err(|e| ExportError::open(&self.path, e))?;
        if let Some(permissions) = existing {
            tmp.as_file()
                .set_permissions(permissions)
                .map_err(|e| ExportError::open(&self.path, e))?;
        }

        // on failure the temporary file is removed when dropped
        let mut writer = BufWriter::new(tmp);
        self.render_into(&mut writer, sets)?;

        let tmp = writer
            .into_inner()
            .map_err(|e| ExportError::close(&self.path, e.into_error()))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| ExportError::close(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| ExportError::close(&self.path, e.error))?;
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

/// New destinations get the same umask-filtered mode a direct create would
#[cfg(unix)]
fn new_file_permissions(builder: &mut Builder<'_, '_>) {
    use std::os::unix::fs::PermissionsExt;
    builder.permissions(fs::Permissions::from_mode(0o666));
}

#[cfg(not(unix))]
fn new_file_permissions(_builder: &mut Builder<'_, '_>) {}

impl fmt::Debug for FileExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileExporter")
            .field("path", &self.path)
            .field("write_mode", &self.write_mode)
            .finish_non_exhaustive()
    }
}

impl Exporter for FileExporter {
    fn name(&self) -> &str {
        "file"
    }

    #[instrument(
        name = "file_exporter_export",
        skip(self, sets),
        fields(path = %self.path.display(), sets = sets.len())
    )]
    fn export(&self, sets: &[DispatcherSet]) -> Result<(), ExportError> {
        match self.write_mode {
            WriteMode::Direct => self.export_direct(sets)?,
            WriteMode::Atomic => self.export_atomic(sets)?,
        }
        debug!("Dispatcher sets exported");
        Ok(())
    }
}
