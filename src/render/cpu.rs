use crate::foundation::error::{StardriftError, StardriftResult};
use crate::foundation::math::{clamp01, lerp, mul_div255_u8};
use crate::render::backend::{FrameRGBA, SurfaceBackend};
use crate::render::plan::{CircleOp, DrawOp, FramePlan, VignetteOp};

/// CPU rasterizer for frame plans.
///
/// Premultiplied RGBA8 end-to-end. The pixel buffer is reused across frames
/// and reallocated only when the backing resolution changes.
pub struct CpuBackend {
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CpuBackend {
    /// Backend with no surface allocated yet.
    pub fn new() -> Self {
        Self { surface: None }
    }

    fn ensure_surface(&mut self, width: u32, height: u32) -> &mut CpuSurface {
        let len = (width as usize) * (height as usize) * 4;
        let reuse = matches!(
            &self.surface,
            Some(s) if s.width == width && s.height == height
        );
        if !reuse {
            self.surface = Some(CpuSurface {
                width,
                height,
                data: vec![0; len],
            });
        }
        self.surface.as_mut().unwrap()
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceBackend for CpuBackend {
    fn execute_plan(&mut self, plan: &FramePlan) -> StardriftResult<FrameRGBA> {
        let width = plan.viewport.backing_width();
        let height = plan.viewport.backing_height();
        if width == 0 || height == 0 {
            return Err(StardriftError::render(
                "backing surface would be empty at this viewport size",
            ));
        }

        let dpr = plan.viewport.dpr();
        let surface = self.ensure_surface(width, height);
        for op in &plan.ops {
            match op {
                DrawOp::Clear => surface.data.fill(0),
                DrawOp::Vignette(v) => draw_vignette(surface, dpr, v),
                DrawOp::Circle(c) => draw_circle(surface, dpr, c),
            }
        }

        Ok(FrameRGBA {
            width,
            height,
            data: surface.data.clone(),
            premultiplied: true,
        })
    }
}

/// Source-over composite of one straight-alpha color onto a premultiplied
/// pixel. Channel sums cannot exceed 255 after rounding.
fn composite_px(dst: &mut [u8], r: u8, g: u8, b: u8, alpha: f64) {
    let sa = (clamp01(alpha) * 255.0).round() as u16;
    if sa == 0 {
        return;
    }
    let inv = 255 - sa;
    dst[0] = mul_div255_u8(u16::from(r), sa) + mul_div255_u8(u16::from(dst[0]), inv);
    dst[1] = mul_div255_u8(u16::from(g), sa) + mul_div255_u8(u16::from(dst[1]), inv);
    dst[2] = mul_div255_u8(u16::from(b), sa) + mul_div255_u8(u16::from(dst[2]), inv);
    dst[3] = sa as u8 + mul_div255_u8(u16::from(dst[3]), inv);
}

/// Rasterize the vignette as a radial ramp from the inner center.
///
/// The op carries full focal (two-circle) geometry; this backend collapses
/// it to a single-center gradient, which is visually equivalent at the
/// parameters the starfield emits (inner radius 0, centers on one axis).
fn draw_vignette(surface: &mut CpuSurface, dpr: f64, v: &VignetteOp) {
    let denom = v.outer_radius - v.inner_radius;
    for y in 0..surface.height {
        let py = (f64::from(y) + 0.5) / dpr;
        for x in 0..surface.width {
            let px = (f64::from(x) + 0.5) / dpr;
            let dist = ((px - v.inner_center.x).powi(2) + (py - v.inner_center.y).powi(2)).sqrt();
            let t = if denom > 0.0 {
                clamp01((dist - v.inner_radius) / denom)
            } else {
                1.0
            };
            let r = lerp(f64::from(v.inner.r), f64::from(v.outer.r), t).round() as u8;
            let g = lerp(f64::from(v.inner.g), f64::from(v.outer.g), t).round() as u8;
            let b = lerp(f64::from(v.inner.b), f64::from(v.outer.b), t).round() as u8;
            let alpha = lerp(v.inner.alpha, v.outer.alpha, t);
            let idx = ((y as usize) * (surface.width as usize) + (x as usize)) * 4;
            composite_px(&mut surface.data[idx..idx + 4], r, g, b, alpha);
        }
    }
}

/// Rasterize one filled circle with a half-pixel antialiased edge.
fn draw_circle(surface: &mut CpuSurface, dpr: f64, c: &CircleOp) {
    let reach = c.radius + 1.0;
    let x0 = (((c.center.x - reach) * dpr).floor().max(0.0)) as u32;
    let y0 = (((c.center.y - reach) * dpr).floor().max(0.0)) as u32;
    let x1 = ((((c.center.x + reach) * dpr).ceil()).max(0.0) as u32).min(surface.width);
    let y1 = ((((c.center.y + reach) * dpr).ceil()).max(0.0) as u32).min(surface.height);

    for y in y0..y1 {
        let py = (f64::from(y) + 0.5) / dpr;
        for x in x0..x1 {
            let px = (f64::from(x) + 0.5) / dpr;
            let dist = ((px - c.center.x).powi(2) + (py - c.center.y).powi(2)).sqrt();
            let coverage = clamp01(c.radius - dist + 0.5);
            if coverage <= 0.0 {
                continue;
            }
            let idx = ((y as usize) * (surface.width as usize) + (x as usize)) * 4;
            composite_px(
                &mut surface.data[idx..idx + 4],
                c.color.r,
                c.color.g,
                c.color.b,
                c.color.alpha * coverage,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::{Point, Viewport};
    use crate::render::plan::Rgba;

    fn plan(ops: Vec<DrawOp>) -> FramePlan {
        FramePlan {
            viewport: Viewport::new(20.0, 10.0, 1.0).unwrap(),
            ops,
        }
    }

    fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * frame.width + x) * 4) as usize;
        frame.data[idx..idx + 4].try_into().unwrap()
    }

    #[test]
    fn clear_only_plan_is_transparent() {
        let mut backend = CpuBackend::new();
        let frame = backend.execute_plan(&plan(vec![DrawOp::Clear])).unwrap();
        assert_eq!(frame.width, 20);
        assert_eq!(frame.height, 10);
        assert!(frame.premultiplied);
        assert!(frame.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn circle_covers_center_not_outside() {
        let mut backend = CpuBackend::new();
        let frame = backend
            .execute_plan(&plan(vec![
                DrawOp::Clear,
                DrawOp::Circle(CircleOp {
                    center: Point::new(10.0, 5.0),
                    radius: 2.0,
                    color: Rgba::white(1.0),
                }),
            ]))
            .unwrap();
        assert_eq!(px(&frame, 10, 5)[3], 255);
        assert_eq!(px(&frame, 0, 0)[3], 0);
        assert_eq!(px(&frame, 19, 9)[3], 0);
    }

    #[test]
    fn circle_alpha_scales_fill() {
        let mut backend = CpuBackend::new();
        let frame = backend
            .execute_plan(&plan(vec![
                DrawOp::Clear,
                DrawOp::Circle(CircleOp {
                    center: Point::new(10.0, 5.0),
                    radius: 2.0,
                    color: Rgba::white(0.5),
                }),
            ]))
            .unwrap();
        let a = px(&frame, 10, 5)[3];
        assert!(a > 120 && a < 135);
    }

    #[test]
    fn dpr_scales_backing_resolution() {
        let mut backend = CpuBackend::new();
        let frame = backend
            .execute_plan(&FramePlan {
                viewport: Viewport::new(20.0, 10.0, 2.0).unwrap(),
                ops: vec![DrawOp::Clear],
            })
            .unwrap();
        assert_eq!((frame.width, frame.height), (40, 20));
    }

    #[test]
    fn rejects_empty_backing_surface() {
        let mut backend = CpuBackend::new();
        let res = backend.execute_plan(&FramePlan {
            viewport: Viewport::new(0.2, 10.0, 1.0).unwrap(),
            ops: vec![DrawOp::Clear],
        });
        assert!(matches!(res, Err(StardriftError::Render(_))));
    }
}
