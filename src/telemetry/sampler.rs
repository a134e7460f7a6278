//! Per-frame telemetry sampling.
//!
//! FPS is published every frame. The latency probe and the bandwidth read
//! run on their own cadences; the probe is dispatched to the telemetry
//! runtime and collected on a later frame, so the loop never waits on it.

use crate::core::constants::{BANDWIDTH_SAMPLE_INTERVAL_SECONDS, LATENCY_PROBE_INTERVAL_SECONDS};
use crate::telemetry::bandwidth::{BandwidthMeter, NetCounters};
use crate::telemetry::cadence::Cadence;
use crate::telemetry::gauges::Gauges;
use crate::telemetry::probe::LatencyProbe;
use crate::telemetry::TelemetryError;
use futures_util::FutureExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Counters of what the sampler has done, for logs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SamplerStats {
    pub latency_dispatched: u32,
    pub latency_completed: u32,
    pub latency_failed: u32,
    pub latency_replaced: u32,
    pub bandwidth_reads: u32,
    pub bandwidth_published: u32,
}

pub struct TelemetrySampler {
    gauges: Gauges,
    runtime: Handle,
    probe: Arc<dyn LatencyProbe>,
    counters: Box<dyn NetCounters>,
    latency_cadence: Cadence,
    bandwidth_cadence: Cadence,
    in_flight: Option<JoinHandle<Result<Duration, TelemetryError>>>,
    meter: BandwidthMeter,
    stats: SamplerStats,
}

impl TelemetrySampler {
    pub fn new(
        gauges: Gauges,
        runtime: Handle,
        probe: Arc<dyn LatencyProbe>,
        counters: Box<dyn NetCounters>,
        start: Instant,
    ) -> Self {
        Self {
            gauges,
            runtime,
            probe,
            counters,
            latency_cadence: Cadence::new(
                Duration::from_secs(LATENCY_PROBE_INTERVAL_SECONDS),
                start,
            ),
            bandwidth_cadence: Cadence::new(
                Duration::from_secs(BANDWIDTH_SAMPLE_INTERVAL_SECONDS),
                start,
            ),
            in_flight: None,
            meter: BandwidthMeter::default(),
            stats: SamplerStats::default(),
        }
    }

    /// Replace the default 5 s / 1 s cadences, restarting them from `start`.
    pub fn with_intervals(
        mut self,
        latency: Duration,
        bandwidth: Duration,
        start: Instant,
    ) -> Self {
        self.latency_cadence = Cadence::new(latency, start);
        self.bandwidth_cadence = Cadence::new(bandwidth, start);
        self
    }

    pub fn gauges(&self) -> &Gauges {
        &self.gauges
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    pub fn probe_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Called once per frame with the frame's timestamp and current FPS.
    pub fn sample(&mut self, now: Instant, fps: f64) {
        self.gauges.set_fps(fps);
        self.collect_probe();
        if self.latency_cadence.is_due(now) {
            self.dispatch_probe();
        }
        if self.bandwidth_cadence.is_due(now) {
            self.sample_bandwidth(now);
        }
    }

    fn dispatch_probe(&mut self) {
        if let Some(stale) = self.in_flight.take() {
            // Left to finish on its own; its result is discarded
            drop(stale);
            self.stats.latency_replaced += 1;
            debug!("latency_probe_replaced");
        }
        let probe = Arc::clone(&self.probe);
        self.in_flight = Some(self.runtime.spawn_blocking(move || probe.measure()));
        self.stats.latency_dispatched += 1;
    }

    fn collect_probe(&mut self) {
        match &self.in_flight {
            Some(handle) if handle.is_finished() => {}
            _ => return,
        }
        let Some(handle) = self.in_flight.take() else {
            return;
        };
        match handle.now_or_never() {
            Some(Ok(Ok(latency))) => {
                let latency_ms = latency.as_secs_f64() * 1000.0;
                self.gauges.set_latency_ms(latency_ms);
                self.stats.latency_completed += 1;
                debug!(latency_ms, "latency_probe_completed");
            }
            Some(Ok(Err(error))) => {
                self.stats.latency_failed += 1;
                warn!(%error, "latency_probe_failed");
            }
            Some(Err(error)) => {
                self.stats.latency_failed += 1;
                warn!(error = %TelemetryError::from(error), "latency_probe_failed");
            }
            None => {}
        }
    }

    fn sample_bandwidth(&mut self, now: Instant) {
        self.stats.bandwidth_reads += 1;
        match self.counters.read() {
            Ok(totals) => {
                if let Some(kbps) = self.meter.record(totals, now) {
                    self.gauges.set_bandwidth_kbps(kbps);
                    self.stats.bandwidth_published += 1;
                }
            }
            Err(error) => warn!(%error, "bandwidth_sample_failed"),
        }
    }
}
