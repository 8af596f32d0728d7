use crate::foundation::core::{Point, Viewport};

/// Straight-alpha color as emitted by the scene (canvas-style).
///
/// Backends convert to their native representation; the CPU backend
/// premultiplies on composite.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Rgba {
    /// Red channel, 0..=255.
    pub r: u8,
    /// Green channel, 0..=255.
    pub g: u8,
    /// Blue channel, 0..=255.
    pub b: u8,
    /// Straight alpha in `[0, 1]`.
    pub alpha: f64,
}

impl Rgba {
    /// White at the given alpha; stars and the vignette's bright stop.
    pub fn white(alpha: f64) -> Self {
        Self {
            r: 255,
            g: 255,
            b: 255,
            alpha,
        }
    }

    /// Black at the given alpha; the vignette's dark stop.
    pub fn black(alpha: f64) -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            alpha,
        }
    }
}

/// Radial bright-to-dark gradient painted over the whole surface.
///
/// Carries the full two-circle (focal) geometry so backends need no implicit
/// state: the gradient runs from `inner` at `(inner_center, inner_radius)` to
/// `outer` at `(outer_center, outer_radius)`.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct VignetteOp {
    /// Center of the bright inner circle.
    pub inner_center: Point,
    /// Radius of the bright inner circle.
    pub inner_radius: f64,
    /// Center of the dark outer circle.
    pub outer_center: Point,
    /// Radius of the dark outer circle.
    pub outer_radius: f64,
    /// Color at the inner stop.
    pub inner: Rgba,
    /// Color at the outer stop.
    pub outer: Rgba,
}

/// One filled circle in viewport units.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct CircleOp {
    /// Circle center in viewport units (parallax already applied).
    pub center: Point,
    /// Radius in viewport units.
    pub radius: f64,
    /// Fill color with the frame's twinkle alpha.
    pub color: Rgba,
}

/// Draw operation emitted by the starfield engine.
#[derive(Clone, Debug, serde::Serialize)]
pub enum DrawOp {
    /// Clear the whole surface to transparent.
    Clear,
    /// Paint the static vignette.
    Vignette(VignetteOp),
    /// Fill one star.
    Circle(CircleOp),
}

/// Backend-agnostic draw plan for one starfield frame.
///
/// Coordinates are viewport units; backends apply the viewport's dpr
/// transform to reach the backing resolution.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FramePlan {
    /// Viewport the plan was produced for.
    pub viewport: Viewport,
    /// Ops in paint order: clear, vignette, then circles.
    pub ops: Vec<DrawOp>,
}

impl FramePlan {
    /// Circle ops in paint order; handy for assertions on star output.
    pub fn circles(&self) -> impl Iterator<Item = &CircleOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Circle(c) => Some(c),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circles_filters_draw_ops() {
        let vp = Viewport::new(100.0, 50.0, 1.0).unwrap();
        let plan = FramePlan {
            viewport: vp,
            ops: vec![
                DrawOp::Clear,
                DrawOp::Circle(CircleOp {
                    center: Point::new(1.0, 2.0),
                    radius: 0.5,
                    color: Rgba::white(0.4),
                }),
            ],
        };
        assert_eq!(plan.circles().count(), 1);
    }

    #[test]
    fn plan_serializes_to_json() {
        let vp = Viewport::new(100.0, 50.0, 1.0).unwrap();
        let plan = FramePlan {
            viewport: vp,
            ops: vec![DrawOp::Clear],
        };
        let s = serde_json::to_string(&plan).unwrap();
        assert!(s.contains("Clear"));
    }
}
