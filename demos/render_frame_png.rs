//! Render one starfield frame to `stardrift_frame.png` with the CPU backend.
//!
//! ```sh
//! cargo run --example render_frame_png
//! ```

use stardrift::{
    CpuBackend, FrameLoop, ManualClock, Scene, SceneConfig, SceneTargets, SurfaceBackend as _,
    Timestamp, Viewport,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let config = SceneConfig {
        seed: Some(7),
        ..SceneConfig::default()
    };
    let viewport = Viewport::new(960.0, 540.0, 1.0)?;
    let scene = Scene::new(&config, SceneTargets::default(), viewport, Timestamp(0.0))?;
    let mut frame_loop = FrameLoop::new(scene, ManualClock::nominal());

    frame_loop.run_ticks(90);
    let frame = frame_loop.tick().expect("loop is running");
    let plan = frame.starfield.expect("surface target present");

    let mut backend = CpuBackend::new();
    let rendered = backend.execute_plan(&plan)?;

    // Flatten premultiplied output over an opaque dark page background.
    let mut flat = Vec::with_capacity(rendered.data.len());
    for px in rendered.data.chunks_exact(4) {
        let inv = u32::from(255 - px[3]);
        for (c, bg) in px[..3].iter().zip([11u32, 15, 36]) {
            flat.push((u32::from(*c) + (bg * inv + 127) / 255).min(255) as u8);
        }
        flat.push(255);
    }

    let img = image::RgbaImage::from_raw(rendered.width, rendered.height, flat)
        .expect("dimensions match buffer");
    img.save("stardrift_frame.png")?;
    tracing::info!(
        width = rendered.width,
        height = rendered.height,
        "wrote stardrift_frame.png"
    );
    Ok(())
}
