//! Export scheduling module.

mod runner;
mod stats;

pub use runner::{ExportScheduler, SchedulerConfig};
pub use stats::ExportStats;
