//! Export run statistics.

use std::time::Duration;

/// Statistics from an export run
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// Exports that completed successfully
    pub exports_ok: u64,

    /// Exports that returned an error
    pub exports_failed: u64,

    /// Ticks skipped because the snapshot was unchanged
    pub exports_skipped: u64,

    /// Configuration reloads that failed (previous snapshot was kept)
    pub reloads_failed: u64,

    /// Total duration of the run
    pub duration: Duration,
}

impl ExportStats {
    pub fn attempts(&self) -> u64 {
        self.exports_ok + self.exports_failed
    }

    /// Print summary
    pub fn print_summary(&self) {
        println!("\nExport Statistics");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Exports: {}", self.attempts());
        println!("   ├─ Succeeded: {}", self.exports_ok);
        println!("   ├─ Failed: {}", self.exports_failed);
        println!("   ├─ Skipped (unchanged): {}", self.exports_skipped);
        println!("   └─ Failed reloads: {}", self.reloads_failed);
        println!();
    }
}
