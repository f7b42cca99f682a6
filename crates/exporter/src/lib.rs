//! # Exporter
//!
//! Dispatcher-set export module.
//!
//! Responsibilities:
//! - Compile the export template once, at construction
//! - Render a snapshot of `DispatcherSet`s into the destination file on every
//!   `export` call
//! - Report open / render / close failures as distinct `ExportError`s
//!
//! # Example
//!
//! ```no_run
//! use exporter::{DispatcherSet, Exporter, FileExporter};
//!
//! let exporter = FileExporter::new("/etc/kamailio/dispatcher.list", "").unwrap();
//! exporter
//!     .export(&[DispatcherSet::new("1", ["10.0.0.1:5060"])])
//!     .unwrap();
//! ```

mod file;
mod template;

pub use contracts::{DispatcherSet, ExportError, ExportErrorKind, Exporter, WriteMode};
pub use file::{FileExporter, FileExporterConfig};
pub use template::DEFAULT_TEMPLATE;
