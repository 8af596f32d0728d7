use std::time::Instant;

use crate::foundation::core::Timestamp;

/// Source of the per-frame monotonic timestamp, one call per frame.
///
/// Abstracts the host's frame scheduler clock so bounded test runs are
/// deterministic.
pub trait FrameClock {
    /// Timestamp for the frame being ticked now.
    fn now(&mut self) -> Timestamp;
}

/// Production clock: milliseconds since construction, monotonic.
pub struct MonotonicClock {
    epoch: Instant,
}

impl MonotonicClock {
    /// Clock anchored at the moment of construction.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for MonotonicClock {
    fn now(&mut self) -> Timestamp {
        Timestamp(self.epoch.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Deterministic clock for tests and demos.
///
/// Each `now()` call returns the current time and then steps it by a fixed
/// interval, emulating a steady display refresh.
pub struct ManualClock {
    now_ms: f64,
    step_ms: f64,
}

impl ManualClock {
    /// Clock starting at `start_ms`, stepping `step_ms` per frame.
    pub fn new(start_ms: f64, step_ms: f64) -> Self {
        Self {
            now_ms: start_ms,
            step_ms,
        }
    }

    /// Clock stepping a nominal 60 fps frame (16.7 ms) from zero.
    pub fn nominal() -> Self {
        Self::new(0.0, 16.7)
    }

    /// Jump the clock to an absolute time; the step cadence continues from
    /// there. Emulates a tab coming back after being hidden.
    pub fn jump_to(&mut self, ms: f64) {
        self.now_ms = ms;
    }

    /// Time the next `now()` call will report.
    pub fn peek(&self) -> Timestamp {
        Timestamp(self.now_ms)
    }
}

impl FrameClock for ManualClock {
    fn now(&mut self) -> Timestamp {
        let t = Timestamp(self.now_ms);
        self.now_ms += self.step_ms;
        t
    }
}
