//! Export scheduler - drives the exporter once or on a fixed interval.
//!
//! The configuration file plays the upstream producer: on every tick the sets
//! are reloaded from it and exported when they changed. The exporter itself
//! (destination, template, write mode) is fixed for the whole run.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{DispatcherSet, Exporter};
use exporter::FileExporter;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use super::ExportStats;

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Configuration file the sets are reloaded from
    pub config_path: PathBuf,

    /// Re-export interval (None = export once)
    pub interval: Option<Duration>,
}

/// Runs exports on tokio's blocking pool, never two at a time
pub struct ExportScheduler {
    config: SchedulerConfig,
    exporter: Arc<FileExporter>,
}

impl ExportScheduler {
    pub fn new(config: SchedulerConfig, exporter: FileExporter) -> Self {
        Self {
            config,
            exporter: Arc::new(exporter),
        }
    }

    /// Run until done (one-shot) or until Ctrl+C / SIGTERM (interval mode)
    pub async fn run(self, initial: Vec<DispatcherSet>) -> Result<ExportStats> {
        self.run_until(initial, shutdown_signal()).await
    }

    /// Run until `shutdown` resolves
    ///
    /// In one-shot mode the export error is returned; in interval mode
    /// failures are logged and counted and the loop continues.
    pub async fn run_until<F>(self, initial: Vec<DispatcherSet>, shutdown: F) -> Result<ExportStats>
    where
        F: Future<Output = ()>,
    {
        let start_time = Instant::now();
        let mut stats = ExportStats::default();

        let Some(period) = self.config.interval else {
            self.export_once(initial).await?;
            stats.exports_ok = 1;
            stats.duration = start_time.elapsed();
            return Ok(stats);
        };

        info!(interval_secs = period.as_secs_f64(), "Starting periodic export");

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut current = initial;
        let mut last_exported: Option<Vec<DispatcherSet>> = None;
        let mut first_tick = true;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    warn!("Received shutdown signal, stopping exporter...");
                    break;
                }
                _ = ticker.tick() => {
                    if !first_tick {
                        match self.reload_sets() {
                            Ok(sets) => current = sets,
                            Err(e) => {
                                stats.reloads_failed += 1;
                                warn!(error = %e, "Failed to reload dispatcher sets, keeping previous snapshot");
                            }
                        }
                    }
                    first_tick = false;

                    if last_exported.as_ref() == Some(&current) {
                        stats.exports_skipped += 1;
                        debug!("Dispatcher sets unchanged, skipping export");
                        continue;
                    }

                    match self.export_once(current.clone()).await {
                        Ok(()) => {
                            stats.exports_ok += 1;
                            last_exported = Some(current.clone());
                        }
                        Err(e) => {
                            stats.exports_failed += 1;
                            last_exported = None;
                            error!(error = %e, "Export failed");
                        }
                    }
                }
            }
        }

        stats.duration = start_time.elapsed();
        Ok(stats)
    }

    async fn export_once(&self, sets: Vec<DispatcherSet>) -> Result<()> {
        let exporter = Arc::clone(&self.exporter);
        let set_count = sets.len();

        tokio::task::spawn_blocking(move || exporter.export(&sets))
            .await
            .context("Export task panicked")?
            .with_context(|| format!("Failed to export to {}", self.exporter.path().display()))?;

        info!(
            path = %self.exporter.path().display(),
            sets = set_count,
            "Dispatcher sets exported"
        );
        Ok(())
    }

    fn reload_sets(&self) -> Result<Vec<DispatcherSet>> {
        let blueprint = config_loader::ConfigLoader::load_from_path(&self.config.config_path)
            .with_context(|| {
                format!(
                    "Failed to reload config from {}",
                    self.config.config_path.display()
                )
            })?;
        Ok(blueprint.sets)
    }
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
