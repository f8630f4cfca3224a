use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use crate::{
    api::{create_router, AppState},
    config::Config,
    metrics::{FileMetricsSink, MetricsSink, MetricsWriterHandle, NoopMetricsSink},
};

/// The recommendation server
///
/// Built once at startup. Owns the bound listener, the router and the metrics
/// writer; nothing else in the process holds mutable state.
pub struct Server {
    listener: TcpListener,
    router: Router,
    metrics_writer: Option<MetricsWriterHandle>,
}

impl Server {
    /// Binds the listener and wires the router from configuration
    pub async fn bind(config: &Config) -> anyhow::Result<Self> {
        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        let (metrics, metrics_writer) = if config.metrics_enabled {
            let (sink, handle) = FileMetricsSink::new(&config.metrics_path);
            tracing::info!(path = %sink.path().display(), "Writing metrics to file");
            (Arc::new(sink) as Arc<dyn MetricsSink>, Some(handle))
        } else {
            tracing::info!("Metrics disabled");
            (Arc::new(NoopMetricsSink) as Arc<dyn MetricsSink>, None)
        };

        Ok(Self {
            listener,
            router: create_router(AppState::new(metrics)),
            metrics_writer,
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until Ctrl-C or a fatal I/O error
    pub async fn run(self) -> anyhow::Result<()> {
        let Self {
            listener,
            router,
            metrics_writer,
        } = self;

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error");

        if let Some(handle) = metrics_writer {
            handle.shutdown().await;
        }

        served
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
