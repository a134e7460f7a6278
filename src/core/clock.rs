//! Frame pacing and instantaneous FPS.

use crate::core::constants::FPS_SAMPLE_WINDOW;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Source of time for the main loop.
///
/// The real implementation sleeps the thread; the simulated one advances a
/// virtual clock so whole runs can be replayed in tests without waiting.
pub trait Pacer {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPacer;

impl Pacer for SystemPacer {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulatedPacer {
    now: Instant,
}

impl SimulatedPacer {
    pub fn starting_at(now: Instant) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl Pacer for SimulatedPacer {
    fn now(&self) -> Instant {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

/// Tracks inter-frame intervals and the next frame deadline.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    frame: Duration,
    next_deadline: Instant,
    last_frame: Option<Instant>,
    intervals: VecDeque<Duration>,
}

impl FrameTimer {
    pub fn new(frame: Duration, start: Instant) -> Self {
        Self {
            frame,
            next_deadline: start + frame,
            last_frame: None,
            intervals: VecDeque::with_capacity(FPS_SAMPLE_WINDOW),
        }
    }

    /// Record that a frame happened at `now` and return the current FPS.
    pub fn record_frame(&mut self, now: Instant) -> f64 {
        if let Some(last) = self.last_frame {
            if self.intervals.len() == FPS_SAMPLE_WINDOW {
                self.intervals.pop_front();
            }
            self.intervals.push_back(now.saturating_duration_since(last));
        }
        self.last_frame = Some(now);
        self.fps()
    }

    /// Mean rate over the last `FPS_SAMPLE_WINDOW` intervals; 0 until two frames exist.
    pub fn fps(&self) -> f64 {
        let total: Duration = self.intervals.iter().sum();
        if self.intervals.is_empty() || total.is_zero() {
            return 0.0;
        }
        self.intervals.len() as f64 / total.as_secs_f64()
    }

    /// How long to sleep so the next frame starts on schedule.
    ///
    /// A late frame resets the schedule from `now` instead of trying to catch up.
    pub fn until_next_frame(&mut self, now: Instant) -> Duration {
        if self.next_deadline > now {
            let wait = self.next_deadline - now;
            self.next_deadline += self.frame;
            wait
        } else {
            self.next_deadline = now + self.frame;
            Duration::ZERO
        }
    }
}
