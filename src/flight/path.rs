//! The analytic flight path: sprite pose as a pure function of the loop
//! phase and the current viewport. No state lives here.

use std::f64::consts::PI;

use crate::foundation::core::{Affine, Vec2, Viewport};

/// Sprite x at phase 0; fully off-screen left.
const ENTRY_X: f64 = -260.0;
/// Extra horizontal travel beyond the viewport width, so the sprite exits
/// fully off-screen right.
const TRAVEL_MARGIN_X: f64 = 520.0;
/// Minimum cruising altitude in viewport pixels.
const MIN_BASE_Y: f64 = 90.0;
/// Cruising altitude as a fraction of viewport height.
const BASE_Y_FRAC: f64 = 0.14;
/// Primary vertical bob amplitude.
const BOB_PRIMARY: f64 = 22.0;
/// Secondary (third-harmonic) bob amplitude.
const BOB_SECONDARY: f64 = 6.0;
/// Roll amplitude in degrees.
const ROLL_DEG: f64 = 2.2;
/// Scale floor and swing.
const SCALE_BASE: f64 = 0.92;
const SCALE_SWING: f64 = 0.06;
/// Fraction of the period spent ramping opacity at each end.
const FADE_IN_END: f64 = 0.08;
const FADE_OUT_START: f64 = 0.92;
/// Opacity floor while fully faded.
const OPACITY_FLOOR: f64 = 0.15;

/// Sprite transform + opacity for one frame.
///
/// Derived, never stored: recomputed from the loop phase every frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SpritePose {
    /// Translation in viewport units.
    pub translate: Vec2,
    /// Roll in degrees, positive clockwise.
    pub rotation_deg: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity in `[OPACITY_FLOOR, 1]`.
    pub opacity: f64,
}

impl SpritePose {
    /// Transform matrix for hosts that consume matrices: translate, then
    /// rotate, then scale (matching a css `translate() rotate() scale()`
    /// chain).
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
    }
}

/// Fade envelope over the loop phase: ramps up over the first 8% of the
/// period, holds at 1, ramps back down over the last 8%.
pub fn fade_at(p: f64) -> f64 {
    if p < FADE_IN_END {
        p / FADE_IN_END
    } else if p > FADE_OUT_START {
        (1.0 - p) / (1.0 - FADE_OUT_START)
    } else {
        1.0
    }
}

/// Pose at phase `p` in `[0, 1)` of the flight loop.
///
/// The sprite travels fully-off-screen-left to fully-off-screen-right with a
/// two-harmonic vertical bob, a gentle roll and a breathing scale.
pub fn pose_at(p: f64, viewport: &Viewport) -> SpritePose {
    let x = ENTRY_X + (viewport.width() + TRAVEL_MARGIN_X) * p;

    let base_y = MIN_BASE_Y.max(viewport.height() * BASE_Y_FRAC);
    let y = base_y + (p * PI * 2.0).sin() * BOB_PRIMARY + (p * PI * 6.0).sin() * BOB_SECONDARY;

    SpritePose {
        translate: Vec2::new(x, y),
        rotation_deg: (p * PI * 2.0).sin() * ROLL_DEG,
        scale: SCALE_BASE + (p * PI).sin() * SCALE_SWING,
        opacity: OPACITY_FLOOR + fade_at(p) * (1.0 - OPACITY_FLOOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp(w: f64, h: f64) -> Viewport {
        Viewport::new(w, h, 1.0).unwrap()
    }

    #[test]
    fn phase_zero_starts_off_screen_left() {
        let pose = pose_at(0.0, &vp(1280.0, 720.0));
        assert_eq!(pose.translate.x, -260.0);
        assert!((pose.opacity - 0.15).abs() < 1e-12);
    }

    #[test]
    fn phase_end_exits_off_screen_right() {
        let pose = pose_at(0.999_999, &vp(1280.0, 720.0));
        assert!(pose.translate.x > 1280.0);
        assert!(pose.opacity < 0.16);
    }

    #[test]
    fn fade_boundary_at_eight_percent() {
        assert_eq!(fade_at(0.08), 1.0);
        assert_eq!(fade_at(0.5), 1.0);
        assert!((fade_at(0.04) - 0.5).abs() < 1e-12);
        assert!((fade_at(0.96) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn opacity_bounds_hold_across_the_loop() {
        let viewport = vp(1024.0, 768.0);
        for i in 0..1000 {
            let p = i as f64 / 1000.0;
            let pose = pose_at(p, &viewport);
            assert!(pose.opacity >= 0.15 - 1e-12);
            assert!(pose.opacity <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn base_altitude_clamps_on_short_viewports() {
        // 0.14 * 400 = 56 < 90, so the floor wins.
        let low = pose_at(0.25, &vp(800.0, 400.0));
        let tall = pose_at(0.25, &vp(800.0, 1000.0));
        let bob = |p: f64| (p * PI * 2.0).sin() * BOB_PRIMARY + (p * PI * 6.0).sin() * BOB_SECONDARY;
        assert!((low.translate.y - (90.0 + bob(0.25))).abs() < 1e-9);
        assert!((tall.translate.y - (140.0 + bob(0.25))).abs() < 1e-9);
    }

    #[test]
    fn roll_and_scale_stay_in_envelope() {
        let viewport = vp(1280.0, 720.0);
        for i in 0..500 {
            let p = i as f64 / 500.0;
            let pose = pose_at(p, &viewport);
            assert!(pose.rotation_deg.abs() <= 2.2 + 1e-12);
            assert!(pose.scale >= 0.92 - 1e-12 && pose.scale <= 0.98 + 1e-12);
        }
    }

    #[test]
    fn to_affine_translates_first() {
        let pose = SpritePose {
            translate: Vec2::new(10.0, 20.0),
            rotation_deg: 0.0,
            scale: 1.0,
            opacity: 1.0,
        };
        assert_eq!(pose.to_affine(), Affine::translate(Vec2::new(10.0, 20.0)));
    }
}
