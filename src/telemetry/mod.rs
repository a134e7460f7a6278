//! Operational telemetry: FPS, latency and bandwidth gauges, the sampler
//! that feeds them from the game loop, and the metrics endpoint.
//!
//! Everything that could block runs on a small tokio runtime owned by
//! [`TelemetryRuntime`]; the game loop only touches atomics and task handles.

pub mod bandwidth;
pub mod cadence;
pub mod gauges;
pub mod probe;
pub mod sampler;
pub mod server;

pub use bandwidth::{NetCounters, NetTotals, ProcNetDev};
pub use gauges::{render_prometheus, Gauges, TelemetrySnapshot};
pub use probe::{HttpLatencyProbe, LatencyProbe};
pub use sampler::{SamplerStats, TelemetrySampler};
pub use server::start_metrics_server;

use std::path::PathBuf;
use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("latency probe to {url} failed: {source}")]
    Probe {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to read probe response: {0}")]
    ProbeBody(#[source] std::io::Error),
    #[error("failed to read {}: {source}", path.display())]
    NetCounters {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unexpected network counter format: {0}")]
    NetDevFormat(String),
    #[error("failed to bind metrics port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start telemetry runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("telemetry task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One-worker runtime hosting the metrics listener and detached tasks.
pub struct TelemetryRuntime {
    runtime: Runtime,
}

impl TelemetryRuntime {
    pub fn start() -> Result<Self, TelemetryError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("flappy-telemetry")
            .enable_all()
            .build()
            .map_err(TelemetryError::Runtime)?;
        Ok(Self { runtime })
    }

    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }

    /// Drop outstanding tasks without waiting for them.
    pub fn shutdown(self) {
        self.runtime.shutdown_background();
    }
}
