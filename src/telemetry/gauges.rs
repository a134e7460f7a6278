//! Latest-value gauges shared between the game loop and the metrics listener.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const FPS_GAUGE: &str = "flappybird_fps";
pub const LATENCY_GAUGE: &str = "flappybird_network_latency";
pub const BANDWIDTH_GAUGE: &str = "flappybird_bandwidth_usage";

/// `f64` stored as its bit pattern so readers never see a torn value.
#[derive(Debug)]
struct Gauge(AtomicU64);

impl Gauge {
    fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

#[derive(Debug)]
struct GaugeSet {
    fps: Gauge,
    /// NaN until the first successful probe.
    latency_ms: Gauge,
    bandwidth_kbps: Gauge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub fps: f64,
    pub latency_ms: Option<f64>,
    pub bandwidth_kbps: f64,
}

/// Cheap to clone; every clone publishes to the same gauges.
#[derive(Debug, Clone)]
pub struct Gauges {
    inner: Arc<GaugeSet>,
}

impl Default for Gauges {
    fn default() -> Self {
        Self {
            inner: Arc::new(GaugeSet {
                fps: Gauge::new(0.0),
                latency_ms: Gauge::new(f64::NAN),
                bandwidth_kbps: Gauge::new(0.0),
            }),
        }
    }
}

impl Gauges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fps(&self, fps: f64) {
        self.inner.fps.set(fps);
    }

    pub fn set_latency_ms(&self, latency_ms: f64) {
        self.inner.latency_ms.set(latency_ms);
    }

    pub fn set_bandwidth_kbps(&self, kbps: f64) {
        self.inner.bandwidth_kbps.set(kbps);
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let latency = self.inner.latency_ms.get();
        TelemetrySnapshot {
            fps: self.inner.fps.get(),
            latency_ms: (!latency.is_nan()).then_some(latency),
            bandwidth_kbps: self.inner.bandwidth_kbps.get(),
        }
    }
}

/// Prometheus text exposition (version 0.0.4) of a snapshot.
pub fn render_prometheus(snapshot: &TelemetrySnapshot) -> String {
    let mut out = String::new();
    write_gauge(&mut out, FPS_GAUGE, "Frames Per Second of FlappyBird", snapshot.fps);
    if let Some(latency) = snapshot.latency_ms {
        write_gauge(&mut out, LATENCY_GAUGE, "Network Latency in milliseconds", latency);
    }
    write_gauge(
        &mut out,
        BANDWIDTH_GAUGE,
        "Bandwidth Usage in KB/s",
        snapshot.bandwidth_kbps,
    );
    out
}

fn write_gauge(out: &mut String, name: &str, help: &str, value: f64) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} gauge");
    let _ = writeln!(out, "{name} {value}");
}
