use std::time::{Duration, Instant};

/// Fixed-schedule timer. Deadlines advance by whole intervals, so the number
/// of firings over a run depends only on elapsed time, not on frame jitter.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    next_due: Instant,
}

impl Cadence {
    pub fn new(interval: Duration, start: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next_due: start + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True at most once per call. Deadlines missed during a stall collapse
    /// into a single firing.
    pub fn is_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        while self.next_due <= now {
            self.next_due += self.interval;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_interval_boundaries() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_secs(1), start);
        assert!(!cadence.is_due(start));
        assert!(!cadence.is_due(start + Duration::from_millis(999)));
        assert!(cadence.is_due(start + Duration::from_secs(1)));
        assert!(!cadence.is_due(start + Duration::from_millis(1500)));
        assert!(cadence.is_due(start + Duration::from_millis(2001)));
    }

    #[test]
    fn test_late_check_keeps_schedule() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_secs(1), start);
        // Late by 900ms: the next deadline is still on the 2s mark
        assert!(cadence.is_due(start + Duration::from_millis(1900)));
        assert!(cadence.is_due(start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_stall_fires_once() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_secs(1), start);
        assert!(cadence.is_due(start + Duration::from_millis(5500)));
        assert!(!cadence.is_due(start + Duration::from_millis(5600)));
        assert!(cadence.is_due(start + Duration::from_secs(6)));
    }
}
