use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::models::RecommendationMetrics;

/// Destination for per-request metrics
///
/// Recording is best-effort: implementations must not fail the request and
/// report problems through logging only.
#[cfg_attr(test, mockall::automock)]
pub trait MetricsSink: Send + Sync {
    fn record(&self, metrics: &RecommendationMetrics);
}

/// Sink that drops every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn record(&self, _metrics: &RecommendationMetrics) {}
}

/// Writes the latest metrics as JSON to a fixed file
///
/// Records are published on a `watch` channel holding a single snapshot, and
/// a background task rewrites the file from it. Request handling never waits
/// on the filesystem, and a slow disk skips intermediate snapshots instead of
/// queueing them. The last record wins.
#[derive(Clone)]
pub struct FileMetricsSink {
    path: PathBuf,
    snapshot_tx: Arc<watch::Sender<Option<RecommendationMetrics>>>,
}

/// Handle for gracefully shutting down the metrics writer
pub struct MetricsWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

impl MetricsWriterHandle {
    /// Stops the writer after flushing the pending snapshot
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Metrics writer task failed");
        }
        tracing::info!("Metrics writer stopped");
    }
}

impl FileMetricsSink {
    /// Creates the sink and spawns its writer task
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(path: impl Into<PathBuf>) -> (Self, MetricsWriterHandle) {
        let path = path.into();
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let task_path = path.clone();
        let task = tokio::spawn(async move {
            Self::writer_task(task_path, snapshot_rx, shutdown_rx).await;
        });

        let sink = Self {
            path,
            snapshot_tx: Arc::new(snapshot_tx),
        };
        (sink, MetricsWriterHandle { shutdown_tx, task })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn writer_task(
        path: PathBuf,
        mut snapshot_rx: watch::Receiver<Option<RecommendationMetrics>>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::debug!(path = %path.display(), "Metrics writer started");

        loop {
            tokio::select! {
                changed = snapshot_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let latest = *snapshot_rx.borrow_and_update();
                    if let Some(metrics) = latest {
                        Self::write_file(&path, &metrics).await;
                    }
                }
                _ = shutdown_rx.recv() => {
                    if snapshot_rx.has_changed().unwrap_or(false) {
                        let latest = *snapshot_rx.borrow_and_update();
                        if let Some(metrics) = latest {
                            Self::write_file(&path, &metrics).await;
                        }
                    }
                    break;
                }
            }
        }
    }

    async fn write_file(path: &Path, metrics: &RecommendationMetrics) {
        let json = match serde_json::to_string_pretty(metrics) {
            Ok(j) => j,
            Err(e) => {
                tracing::error!(error = %e, "Failed to marshal metrics");
                return;
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(error = %e, path = %parent.display(), "Failed to create metrics directory");
                return;
            }
        }

        if let Err(e) = tokio::fs::write(path, json).await {
            tracing::warn!(error = %e, path = %path.display(), "Failed to write metrics");
        }
    }
}

impl MetricsSink for FileMetricsSink {
    fn record(&self, metrics: &RecommendationMetrics) {
        if self.snapshot_tx.send(Some(*metrics)).is_err() {
            tracing::warn!("Metrics writer is not running");
        }
    }
}
