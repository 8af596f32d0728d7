use rand::rngs::StdRng;

use crate::foundation::core::{Point, Timestamp, Vec2, Viewport};
use crate::foundation::error::StardriftResult;
use crate::render::plan::{CircleOp, DrawOp, FramePlan, Rgba, VignetteOp};
use crate::starfield::layer::{LayerSpec, parallax_strength};
use crate::starfield::star::Star;

/// Pointer offset range: normalized displacement from center maps to ±3 px.
const POINTER_RANGE_PX: f64 = 3.0;

/// Stars wrap once they drift this far past an edge.
const WRAP_MARGIN_PX: f64 = 10.0;

/// Vignette bright-stop alpha (white).
const VIGNETTE_INNER_ALPHA: f64 = 0.03;
/// Vignette dark-stop alpha (black).
const VIGNETTE_OUTER_ALPHA: f64 = 0.18;

/// The starfield engine: owns the star set, the surface dimensions, the
/// pointer offset and the random source.
///
/// State is mutated only through `resize`, `pointer_moved` and `advance`;
/// `plan` is read-only. Nothing here is shared across engines.
pub struct Starfield {
    layers: Vec<LayerSpec>,
    stars: Vec<Star>,
    viewport: Viewport,
    pointer: Vec2,
    rng: StdRng,
}

impl Starfield {
    /// Build an engine and generate the initial star set.
    pub fn new(
        layers: Vec<LayerSpec>,
        viewport: Viewport,
        rng: StdRng,
    ) -> StardriftResult<Self> {
        for layer in &layers {
            layer.validate()?;
        }
        let mut engine = Self {
            layers,
            stars: Vec::new(),
            viewport,
            pointer: Vec2::ZERO,
            rng,
        };
        engine.regenerate();
        Ok(engine)
    }

    /// Adopt new surface dimensions and rebuild the star set from scratch.
    ///
    /// Old particles are discarded, not repositioned; only statistical
    /// density survives a resize.
    #[tracing::instrument(skip(self), fields(stars = self.star_capacity()))]
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.stars.clear();
        self.stars.reserve(self.star_capacity());
        for (li, spec) in self.layers.iter().enumerate() {
            for _ in 0..spec.count {
                self.stars
                    .push(Star::spawn(li, spec, &self.viewport, &mut self.rng));
            }
        }
    }

    fn star_capacity(&self) -> usize {
        self.layers.iter().map(|l| l.count).sum()
    }

    /// Update the pointer parallax offset from a pointer position in
    /// viewport coordinates. Hot path: writes two scalars, no allocation.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        let center = self.viewport.center();
        self.pointer = Vec2::new(
            (x - center.x) / center.x * POINTER_RANGE_PX,
            (y - center.y) / center.y * POINTER_RANGE_PX,
        );
    }

    /// Drift every star one nominal tick and wrap at the edges.
    ///
    /// Wrapped stars re-enter just outside the opposite edge: past the left
    /// margin they reappear at `width + margin`, past the bottom margin at
    /// `-margin`.
    pub fn advance(&mut self) {
        let (w, h) = (self.viewport.width(), self.viewport.height());
        for star in &mut self.stars {
            let drift = self.layers[star.layer].drift_per_tick();
            star.pos = star.pos + drift;
            if star.pos.x < -WRAP_MARGIN_PX {
                star.pos.x = w + WRAP_MARGIN_PX;
            }
            if star.pos.y > h + WRAP_MARGIN_PX {
                star.pos.y = -WRAP_MARGIN_PX;
            }
        }
    }

    /// Emit the draw plan for the current state at `now`.
    ///
    /// Paint order: clear, vignette, then every star as a filled circle with
    /// its twinkle alpha and layer-scaled pointer parallax.
    pub fn plan(&self, now: Timestamp) -> FramePlan {
        let mut ops = Vec::with_capacity(2 + self.stars.len());
        ops.push(DrawOp::Clear);
        ops.push(DrawOp::Vignette(self.vignette()));
        for star in &self.stars {
            let strength = parallax_strength(star.layer);
            ops.push(DrawOp::Circle(CircleOp {
                center: star.pos + self.pointer * strength,
                radius: star.radius,
                color: Rgba::white(star.alpha(now)),
            }));
        }
        FramePlan {
            viewport: self.viewport,
            ops,
        }
    }

    /// One full frame step: advance, then plan.
    pub fn frame(&mut self, now: Timestamp) -> FramePlan {
        self.advance();
        self.plan(now)
    }

    fn vignette(&self) -> VignetteOp {
        let (w, h) = (self.viewport.width(), self.viewport.height());
        VignetteOp {
            inner_center: Point::new(w * 0.5, h * 0.3),
            inner_radius: 0.0,
            outer_center: Point::new(w * 0.5, h * 0.5),
            outer_radius: self.viewport.max_dim() * 0.7,
            inner: Rgba::white(VIGNETTE_INNER_ALPHA),
            outer: Rgba::black(VIGNETTE_OUTER_ALPHA),
        }
    }

    /// Current star set.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Layer table the engine was built with.
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Surface dimensions the current star set was generated for.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Current pointer parallax offset in pixels.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starfield::layer::default_layers;
    use rand::SeedableRng;

    fn engine(w: f64, h: f64) -> Starfield {
        Starfield::new(
            default_layers().to_vec(),
            Viewport::new(w, h, 1.0).unwrap(),
            StdRng::seed_from_u64(42),
        )
        .unwrap()
    }

    #[test]
    fn star_set_matches_layer_counts() {
        let engine = engine(1200.0, 800.0);
        assert_eq!(engine.stars().len(), 90 + 70 + 45);
        for star in engine.stars() {
            assert!(star.layer < 3);
        }
    }

    #[test]
    fn resize_rebuilds_full_population() {
        let mut engine = engine(1200.0, 800.0);
        engine.resize(Viewport::new(400.0, 300.0, 2.0).unwrap());
        assert_eq!(engine.stars().len(), 205);
        for star in engine.stars() {
            assert!(star.pos.x >= 0.0 && star.pos.x < 400.0);
            assert!(star.pos.y >= 0.0 && star.pos.y < 300.0);
        }
    }

    #[test]
    fn pointer_at_center_is_zero_offset() {
        let mut engine = engine(1000.0, 600.0);
        engine.pointer_moved(500.0, 300.0);
        assert_eq!(engine.pointer(), Vec2::ZERO);
    }

    #[test]
    fn pointer_at_corner_is_full_range() {
        let mut engine = engine(1000.0, 600.0);
        engine.pointer_moved(1000.0, 0.0);
        assert_eq!(engine.pointer(), Vec2::new(3.0, -3.0));
    }

    #[test]
    fn advance_wraps_past_left_edge_to_right() {
        let mut engine = engine(800.0, 600.0);
        engine.stars[0].pos = Point::new(-10.5, 100.0);
        engine.advance();
        assert!(engine.stars()[0].pos.x >= 800.0);
    }

    #[test]
    fn advance_wraps_past_bottom_edge_to_top() {
        let mut engine = engine(800.0, 600.0);
        engine.stars[0].pos = Point::new(100.0, 610.5);
        engine.advance();
        assert!(engine.stars()[0].pos.y <= 0.0);
    }

    #[test]
    fn plan_applies_layer_scaled_parallax() {
        let mut engine = engine(1000.0, 600.0);
        engine.pointer_moved(1000.0, 300.0); // offset (3, 0)
        let base: Vec<Point> = engine.stars().iter().map(|s| s.pos).collect();
        let plan = engine.plan(Timestamp(0.0));
        for (circle, (star, pos)) in plan.circles().zip(engine.stars().iter().zip(base)) {
            let expected = pos.x + 3.0 * parallax_strength(star.layer);
            assert!((circle.center.x - expected).abs() < 1e-12);
            assert_eq!(circle.center.y, pos.y);
        }
    }

    #[test]
    fn plan_leads_with_clear_and_vignette() {
        let mut engine = engine(640.0, 480.0);
        let plan = engine.frame(Timestamp(16.7));
        assert!(matches!(plan.ops[0], DrawOp::Clear));
        assert!(matches!(plan.ops[1], DrawOp::Vignette(_)));
        assert_eq!(plan.ops.len(), 2 + 205);
    }

    #[test]
    fn vignette_geometry_tracks_viewport() {
        let engine = engine(1000.0, 500.0);
        let v = engine.vignette();
        assert_eq!(v.inner_center, Point::new(500.0, 150.0));
        assert_eq!(v.outer_center, Point::new(500.0, 250.0));
        assert_eq!(v.outer_radius, 700.0);
    }

    #[test]
    fn rejects_invalid_layer_table() {
        let mut layers = default_layers().to_vec();
        layers[0].count = 0;
        let res = Starfield::new(
            layers,
            Viewport::new(800.0, 600.0, 1.0).unwrap(),
            StdRng::seed_from_u64(0),
        );
        assert!(res.is_err());
    }
}
