use rand::Rng;

use crate::foundation::core::{Point, Timestamp, Viewport};
use crate::starfield::layer::LayerSpec;

/// Extra alpha contributed by a fully bright twinkle.
pub const TWINKLE_GAIN: f64 = 0.18;

/// One starfield particle.
///
/// Randomized fields are fixed at spawn; only `pos` mutates afterwards.
/// A star belongs to exactly one layer for its whole lifetime.
#[derive(Clone, Debug)]
pub struct Star {
    /// Position in viewport units.
    pub pos: Point,
    /// Radius in viewport units.
    pub radius: f64,
    /// Opacity floor; twinkle adds on top.
    pub base_alpha: f64,
    /// Index into the engine's layer table.
    pub layer: usize,
    /// Twinkle frequency multiplier.
    pub twinkle_freq: f64,
    /// Twinkle phase offset in radians.
    pub twinkle_phase: f64,
}

impl Star {
    /// Spawn a star uniformly over the viewport with randomized appearance.
    pub fn spawn(
        layer: usize,
        spec: &LayerSpec,
        viewport: &Viewport,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            pos: Point::new(
                rng.random_range(0.0..viewport.width()),
                rng.random_range(0.0..viewport.height()),
            ),
            radius: rng.random_range(0.3..1.2) * spec.size_mul,
            base_alpha: rng.random_range(0.15..0.70),
            layer,
            twinkle_freq: rng.random_range(0.6..2.1),
            twinkle_phase: rng.random_range(0.0..std::f64::consts::TAU),
        }
    }

    /// Twinkle intensity in `[0, 1]` at `now`.
    pub fn twinkle(&self, now: Timestamp) -> f64 {
        ((now.seconds() * self.twinkle_freq + self.twinkle_phase).sin() + 1.0) * 0.5
    }

    /// Draw alpha at `now`: base alpha plus the twinkle contribution.
    ///
    /// Always within `[base_alpha, base_alpha + TWINKLE_GAIN]`.
    pub fn alpha(&self, now: Timestamp) -> f64 {
        self.base_alpha + self.twinkle(now) * TWINKLE_GAIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::starfield::layer::default_layers;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn spawn_respects_ranges() {
        let viewport = Viewport::new(1200.0, 800.0, 1.0).unwrap();
        let layers = default_layers();
        let mut rng = StdRng::seed_from_u64(7);
        for (li, spec) in layers.iter().enumerate() {
            for _ in 0..200 {
                let star = Star::spawn(li, spec, &viewport, &mut rng);
                assert!(star.pos.x >= 0.0 && star.pos.x < 1200.0);
                assert!(star.pos.y >= 0.0 && star.pos.y < 800.0);
                assert!(star.radius >= 0.3 * spec.size_mul);
                assert!(star.radius < 1.2 * spec.size_mul);
                assert!(star.base_alpha >= 0.15 && star.base_alpha < 0.70);
                assert!(star.twinkle_freq >= 0.6 && star.twinkle_freq < 2.1);
                assert!(star.twinkle_phase >= 0.0 && star.twinkle_phase < std::f64::consts::TAU);
                assert_eq!(star.layer, li);
            }
        }
    }

    #[test]
    fn alpha_stays_in_twinkle_band() {
        let viewport = Viewport::new(640.0, 480.0, 1.0).unwrap();
        let spec = default_layers()[1];
        let mut rng = StdRng::seed_from_u64(11);
        let star = Star::spawn(1, &spec, &viewport, &mut rng);
        for ms in [0.0, 16.7, 250.0, 1000.0, 59_321.5, 3_600_000.0] {
            let alpha = star.alpha(Timestamp(ms));
            assert!(alpha >= star.base_alpha);
            assert!(alpha <= star.base_alpha + TWINKLE_GAIN);
        }
    }

    #[test]
    fn seeded_spawn_is_reproducible() {
        let viewport = Viewport::new(800.0, 600.0, 1.0).unwrap();
        let spec = default_layers()[0];
        let a = Star::spawn(0, &spec, &viewport, &mut StdRng::seed_from_u64(3));
        let b = Star::spawn(0, &spec, &viewport, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.radius, b.radius);
        assert_eq!(a.base_alpha, b.base_alpha);
    }
}
