use rand::Rng;

use crate::flight::path::{SpritePose, pose_at};
use crate::foundation::core::{Timestamp, Viewport};
use crate::foundation::error::{StardriftError, StardriftResult};

/// Shortest flight period drawn at start, in milliseconds.
pub const PERIOD_MIN_MS: f64 = 12_000.0;
/// Longest flight period drawn at start, in milliseconds.
pub const PERIOD_MAX_MS: f64 = 20_000.0;

/// The flight animator: one sprite looping across the viewport.
///
/// The only persistent state is the time origin; the pose is recomputed from
/// elapsed time every frame. The period is drawn once at construction and
/// fixed for the session.
#[derive(Clone, Debug)]
pub struct FlightAnimator {
    origin: Timestamp,
    period_ms: f64,
}

impl FlightAnimator {
    /// Start a flight at `start` with a period drawn uniformly from
    /// `[PERIOD_MIN_MS, PERIOD_MAX_MS)`.
    pub fn new(start: Timestamp, rng: &mut impl Rng) -> Self {
        Self {
            origin: start,
            period_ms: rng.random_range(PERIOD_MIN_MS..PERIOD_MAX_MS),
        }
    }

    /// Start a flight with a pinned period; for reproducible sessions.
    pub fn with_period(start: Timestamp, period_ms: f64) -> StardriftResult<Self> {
        if !period_ms.is_finite() || period_ms <= 0.0 {
            return Err(StardriftError::validation(
                "flight period must be finite and > 0 ms",
            ));
        }
        Ok(Self {
            origin: start,
            period_ms,
        })
    }

    /// Reset the time origin; the loop restarts from its off-screen entry.
    pub fn focus_regained(&mut self, now: Timestamp) {
        self.origin = now;
    }

    /// Loop phase in `[0, 1)` at `now`.
    pub fn phase(&self, now: Timestamp) -> f64 {
        now.since(self.origin).rem_euclid(self.period_ms) / self.period_ms
    }

    /// Pose for the current frame. Pure: the animator itself is not mutated.
    pub fn advance(&self, now: Timestamp, viewport: &Viewport) -> SpritePose {
        pose_at(self.phase(now), viewport)
    }

    /// Period fixed at construction, in milliseconds.
    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }
}
