//! Synthetic network latency probe.

use crate::telemetry::TelemetryError;
use std::io::Read;
use std::time::{Duration, Instant};

/// Blocking round-trip measurement. Runs on a blocking task of the
/// telemetry runtime, never on the game loop thread.
pub trait LatencyProbe: Send + Sync {
    fn measure(&self) -> Result<Duration, TelemetryError>;
}

/// Times a GET request including reading the full body.
pub struct HttpLatencyProbe {
    agent: ureq::Agent,
    url: String,
}

impl HttpLatencyProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LatencyProbe for HttpLatencyProbe {
    fn measure(&self) -> Result<Duration, TelemetryError> {
        let started = Instant::now();
        let response = self
            .agent
            .get(&self.url)
            .call()
            .map_err(|e| TelemetryError::Probe {
                url: self.url.clone(),
                source: Box::new(e),
            })?;
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(TelemetryError::ProbeBody)?;
        Ok(started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_target_is_an_error() {
        let probe = HttpLatencyProbe::new("http://127.0.0.1:9/metrics", Duration::from_millis(500));
        let err = probe.measure().unwrap_err();
        assert!(matches!(err, TelemetryError::Probe { .. }));
        assert!(err.to_string().contains(probe.url()));
    }
}
