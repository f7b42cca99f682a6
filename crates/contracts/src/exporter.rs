//! Exporter trait - export backend interface
//!
//! Defines the abstract interface for exporters.

use crate::{DispatcherSet, ExportError};

/// Dispatcher-set export trait
///
/// Implementations render the given snapshot synchronously on the caller's
/// thread. They neither poll nor cache: every call reflects exactly the
/// snapshot it was given.
pub trait Exporter: Send + Sync {
    /// Exporter name (used for logging)
    fn name(&self) -> &str;

    /// Export a snapshot of dispatcher sets
    ///
    /// # Errors
    /// Returns an error describing which stage failed (open / render / close)
    fn export(&self, sets: &[DispatcherSet]) -> Result<(), ExportError>;
}
