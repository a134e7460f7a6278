//! Integration test: telemetry sampling cadence and the metrics endpoint.

use flappy::telemetry::{
    start_metrics_server, Gauges, HttpLatencyProbe, LatencyProbe, NetCounters, NetTotals,
    TelemetryError, TelemetryRuntime, TelemetrySampler,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct QuickProbe;

impl LatencyProbe for QuickProbe {
    fn measure(&self) -> Result<Duration, TelemetryError> {
        Ok(Duration::from_millis(2))
    }
}

/// 2 KiB received per read.
#[derive(Default)]
struct Counters(u64);

impl NetCounters for Counters {
    fn read(&mut self) -> Result<NetTotals, TelemetryError> {
        self.0 += 2048;
        Ok(NetTotals {
            rx_bytes: self.0,
            tx_bytes: 0,
        })
    }
}

fn local_url(addr: std::net::SocketAddr, path: &str) -> String {
    format!("http://127.0.0.1:{}{}", addr.port(), path)
}

// =============================================================================
// Cadence
// =============================================================================

#[test]
fn test_ten_seconds_of_jittery_frames() {
    let runtime = TelemetryRuntime::start().unwrap();
    let start = Instant::now();
    let mut sampler = TelemetrySampler::new(
        Gauges::new(),
        runtime.handle(),
        Arc::new(QuickProbe),
        Box::new(Counters::default()),
        start,
    );

    let mut rng = ChaCha8Rng::seed_from_u64(30);
    for k in 1..=300u64 {
        let jitter = rng.gen_range(0..10_000u64);
        let now = start + Duration::from_micros(k * 1_000_000 / 30 + jitter);
        sampler.sample(now, 30.0);
    }

    let stats = sampler.stats();
    assert_eq!(stats.latency_dispatched, 2);
    assert_eq!(stats.bandwidth_reads, 10);
    assert_eq!(stats.bandwidth_published, 9);
    assert!((sampler.gauges().snapshot().bandwidth_kbps - 2.0).abs() < 0.1);
    runtime.shutdown();
}

#[test]
fn test_long_stall_fires_once() {
    let runtime = TelemetryRuntime::start().unwrap();
    let start = Instant::now();
    let mut sampler = TelemetrySampler::new(
        Gauges::new(),
        runtime.handle(),
        Arc::new(QuickProbe),
        Box::new(Counters::default()),
        start,
    );
    sampler.sample(start + Duration::from_secs(12), 1.0);
    let stats = sampler.stats();
    assert_eq!(stats.latency_dispatched, 1);
    assert_eq!(stats.bandwidth_reads, 1);
    runtime.shutdown();
}

// =============================================================================
// Metrics endpoint
// =============================================================================

#[test]
fn test_metrics_endpoint_serves_gauges() {
    let runtime = TelemetryRuntime::start().unwrap();
    let gauges = Gauges::new();
    let addr = start_metrics_server(&runtime.handle(), 0, gauges.clone()).unwrap();
    gauges.set_fps(29.5);
    gauges.set_bandwidth_kbps(1.25);

    let response = ureq::get(&local_url(addr, "/metrics")).call().unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("Content-Type"),
        Some("text/plain; version=0.0.4; charset=utf-8")
    );
    let body = response.into_string().unwrap();
    assert!(body.contains("# TYPE flappybird_fps gauge"));
    assert!(body.contains("flappybird_fps 29.5"));
    assert!(body.contains("flappybird_bandwidth_usage 1.25"));
    assert!(!body.contains("flappybird_network_latency"));

    gauges.set_latency_ms(8.0);
    let body = ureq::get(&local_url(addr, "/metrics"))
        .call()
        .unwrap()
        .into_string()
        .unwrap();
    assert!(body.contains("flappybird_network_latency 8"));
    runtime.shutdown();
}

#[test]
fn test_other_paths_are_not_found() {
    let runtime = TelemetryRuntime::start().unwrap();
    let addr = start_metrics_server(&runtime.handle(), 0, Gauges::new()).unwrap();
    match ureq::get(&local_url(addr, "/")).call() {
        Err(ureq::Error::Status(code, _)) => assert_eq!(code, 404),
        other => panic!("expected 404, got {:?}", other.map(|r| r.status())),
    }
    runtime.shutdown();
}

#[test]
fn test_probe_measures_round_trip_to_endpoint() {
    let runtime = TelemetryRuntime::start().unwrap();
    let addr = start_metrics_server(&runtime.handle(), 0, Gauges::new()).unwrap();
    let probe = HttpLatencyProbe::new(local_url(addr, "/metrics"), Duration::from_secs(2));
    let latency = probe.measure().unwrap();
    assert!(latency < Duration::from_secs(2));
    runtime.shutdown();
}
