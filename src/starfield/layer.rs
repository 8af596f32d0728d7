use crate::foundation::core::Vec2;
use crate::foundation::error::{StardriftError, StardriftResult};

/// Number of depth layers in the default starfield.
pub const LAYER_COUNT: usize = 3;

/// Frame interval the drift step is tuned for (~60 fps).
///
/// Drift advances by a constant per-tick step rather than by measured elapsed
/// time, so visual speed tracks the host refresh rate. Deliberate: resolved
/// in DESIGN.md.
pub const NOMINAL_FRAME_SECS: f64 = 0.016;

/// Depth layer configuration shared by all stars on the layer.
///
/// Layers are ordered far to near; nearer layers drift faster, spawn larger
/// stars and parallax more.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerSpec {
    /// Stars generated for this layer on every resize.
    pub count: usize,
    /// Drift speed scalar; see [`LayerSpec::drift_per_tick`].
    pub speed: f64,
    /// Base radius multiplier applied to each spawned star.
    pub size_mul: f64,
}

impl LayerSpec {
    /// Reject degenerate layer parameters up front so the frame path can
    /// treat them as plain numbers.
    pub fn validate(&self) -> StardriftResult<()> {
        if self.count == 0 {
            return Err(StardriftError::validation("layer count must be > 0"));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(StardriftError::validation(
                "layer speed must be finite and >= 0",
            ));
        }
        if !self.size_mul.is_finite() || self.size_mul <= 0.0 {
            return Err(StardriftError::validation(
                "layer size_mul must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Per-tick drift in viewport pixels: left and slightly down.
    pub fn drift_per_tick(&self) -> Vec2 {
        Vec2::new(
            -self.speed * 60.0 * NOMINAL_FRAME_SECS,
            self.speed * 20.0 * NOMINAL_FRAME_SECS,
        )
    }
}

/// Default three-layer set, far to near.
pub fn default_layers() -> [LayerSpec; LAYER_COUNT] {
    [
        LayerSpec {
            count: 90,
            speed: 0.08,
            size_mul: 1.1,
        },
        LayerSpec {
            count: 70,
            speed: 0.14,
            size_mul: 1.4,
        },
        LayerSpec {
            count: 45,
            speed: 0.22,
            size_mul: 1.8,
        },
    ]
}

/// Pointer parallax strength for a layer index; nearer layers move more.
pub fn parallax_strength(layer: usize) -> f64 {
    0.6 + layer as f64 * 0.25
}
