use crate::foundation::error::{StardriftError, StardriftResult};

pub use kurbo::{Affine, Point, Vec2};

/// Milliseconds on the host's monotonic frame clock.
///
/// Values are validated once at the clock/event boundary; everything past
/// that boundary treats timestamps as plain finite numbers.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Timestamp(pub f64);

impl Timestamp {
    /// Validating constructor: the host clock must be finite and non-negative.
    pub fn new(ms: f64) -> StardriftResult<Self> {
        if !ms.is_finite() || ms < 0.0 {
            return Err(StardriftError::validation(
                "timestamp must be finite and >= 0 ms",
            ));
        }
        Ok(Self(ms))
    }

    /// Raw milliseconds.
    pub fn millis(self) -> f64 {
        self.0
    }

    /// Timestamp in seconds (the twinkle sinusoid works in seconds).
    pub fn seconds(self) -> f64 {
        self.0 * 0.001
    }

    /// Elapsed milliseconds since `origin`. Negative if `origin` is later.
    pub fn since(self, origin: Timestamp) -> f64 {
        self.0 - origin.0
    }
}

/// Lower bound applied to the host's device pixel ratio.
pub const DPR_MIN: f64 = 1.0;
/// Upper bound applied to the host's device pixel ratio.
pub const DPR_MAX: f64 = 2.0;

/// Host viewport in css pixels plus the clamped device pixel ratio.
///
/// All scene coordinates are viewport units; only the render backend applies
/// the dpr transform to reach the backing resolution.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Viewport {
    width: f64,
    height: f64,
    dpr: f64,
}

impl Viewport {
    /// Validating constructor. Width/height must be finite and positive; the
    /// device pixel ratio is clamped to `[DPR_MIN, DPR_MAX]`.
    pub fn new(width: f64, height: f64, dpr: f64) -> StardriftResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(StardriftError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(StardriftError::validation(
                "device pixel ratio must be finite and > 0",
            ));
        }
        Ok(Self {
            width,
            height,
            dpr: dpr.clamp(DPR_MIN, DPR_MAX),
        })
    }

    /// Viewport width in css pixels.
    pub fn width(self) -> f64 {
        self.width
    }

    /// Viewport height in css pixels.
    pub fn height(self) -> f64 {
        self.height
    }

    /// Clamped device pixel ratio.
    pub fn dpr(self) -> f64 {
        self.dpr
    }

    /// Backing surface width in device pixels: `round(width * dpr)`.
    pub fn backing_width(self) -> u32 {
        (self.width * self.dpr).round() as u32
    }

    /// Backing surface height in device pixels: `round(height * dpr)`.
    pub fn backing_height(self) -> u32 {
        (self.height * self.dpr).round() as u32
    }

    /// Viewport center in css pixels.
    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Larger of width/height; sizes the vignette radius.
    pub fn max_dim(self) -> f64 {
        self.width.max(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_rejects_non_finite_and_negative() {
        assert!(Timestamp::new(f64::NAN).is_err());
        assert!(Timestamp::new(f64::INFINITY).is_err());
        assert!(Timestamp::new(-1.0).is_err());
        assert_eq!(Timestamp::new(1500.0).unwrap().seconds(), 1.5);
    }

    #[test]
    fn viewport_clamps_dpr() {
        assert_eq!(Viewport::new(800.0, 600.0, 0.5).unwrap().dpr(), 1.0);
        assert_eq!(Viewport::new(800.0, 600.0, 3.0).unwrap().dpr(), 2.0);
        assert_eq!(Viewport::new(800.0, 600.0, 1.5).unwrap().dpr(), 1.5);
    }

    #[test]
    fn viewport_backing_resolution_rounds() {
        let vp = Viewport::new(1001.0, 601.0, 1.5).unwrap();
        assert_eq!(vp.backing_width(), 1502); // round(1501.5)
        assert_eq!(vp.backing_height(), 902); // round(901.5)
    }

    #[test]
    fn viewport_rejects_degenerate_dimensions() {
        assert!(Viewport::new(0.0, 600.0, 1.0).is_err());
        assert!(Viewport::new(800.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(f64::NAN, 600.0, 1.0).is_err());
        assert!(Viewport::new(800.0, 600.0, f64::NAN).is_err());
    }
}
