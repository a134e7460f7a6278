//! Host network byte counters.

use crate::telemetry::TelemetryError;
use std::path::PathBuf;
use std::time::Instant;

pub const PROC_NET_DEV: &str = "/proc/net/dev";

/// Cumulative byte counts across all non-loopback interfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetTotals {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl NetTotals {
    pub fn total(&self) -> u64 {
        self.rx_bytes.saturating_add(self.tx_bytes)
    }
}

pub trait NetCounters: Send {
    fn read(&mut self) -> Result<NetTotals, TelemetryError>;
}

/// Linux counters from `/proc/net/dev`.
#[derive(Debug, Clone)]
pub struct ProcNetDev {
    path: PathBuf,
}

impl Default for ProcNetDev {
    fn default() -> Self {
        Self::at(PROC_NET_DEV)
    }
}

impl ProcNetDev {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NetCounters for ProcNetDev {
    fn read(&mut self) -> Result<NetTotals, TelemetryError> {
        let text =
            std::fs::read_to_string(&self.path).map_err(|source| TelemetryError::NetCounters {
                path: self.path.clone(),
                source,
            })?;
        parse_proc_net_dev(&text)
    }
}

/// Sum receive and transmit bytes over every interface except `lo`.
pub fn parse_proc_net_dev(text: &str) -> Result<NetTotals, TelemetryError> {
    let mut totals = NetTotals::default();
    let mut interfaces = 0;
    for line in text.lines() {
        let Some((name, counters)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.contains('|') {
            continue;
        }
        let fields: Vec<&str> = counters.split_whitespace().collect();
        if fields.len() < 16 {
            return Err(TelemetryError::NetDevFormat(format!(
                "interface {name} has {} fields",
                fields.len()
            )));
        }
        if name == "lo" {
            continue;
        }
        let rx = parse_counter(name, fields[0])?;
        let tx = parse_counter(name, fields[8])?;
        totals.rx_bytes = totals.rx_bytes.saturating_add(rx);
        totals.tx_bytes = totals.tx_bytes.saturating_add(tx);
        interfaces += 1;
    }
    if interfaces == 0 && !text.contains("lo:") {
        return Err(TelemetryError::NetDevFormat(
            "no interfaces listed".to_string(),
        ));
    }
    Ok(totals)
}

fn parse_counter(name: &str, raw: &str) -> Result<u64, TelemetryError> {
    raw.parse()
        .map_err(|_| TelemetryError::NetDevFormat(format!("interface {name}: bad counter {raw:?}")))
}

/// Turns successive counter reads into a rate. The first read only sets the
/// baseline.
#[derive(Debug, Default, Clone)]
pub struct BandwidthMeter {
    last: Option<(NetTotals, Instant)>,
}

impl BandwidthMeter {
    /// KB/s (1 KB = 1024 bytes) since the previous reading, if there was one.
    pub fn record(&mut self, totals: NetTotals, at: Instant) -> Option<f64> {
        let previous = self.last.replace((totals, at));
        let (before, then) = previous?;
        let elapsed = at.saturating_duration_since(then).as_secs_f64();
        if elapsed <= 0.0 {
            return None;
        }
        // Counters restart when an interface is re-created
        let delta = totals.total().saturating_sub(before.total());
        Some(delta as f64 / 1024.0 / elapsed)
    }
}
