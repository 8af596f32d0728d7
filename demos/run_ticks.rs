//! Drive the scene for a bounded number of deterministic ticks and print
//! what each subsystem produced.
//!
//! ```sh
//! cargo run --example run_ticks
//! ```

use stardrift::{
    FrameLoop, InputEvent, ManualClock, Scene, SceneConfig, SceneTargets, Timestamp, Viewport,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let config = SceneConfig {
        seed: Some(2024),
        flight_period_ms: Some(15_000.0),
        ..SceneConfig::default()
    };
    let viewport = Viewport::new(1280.0, 720.0, 1.5)?;
    let scene = Scene::new(&config, SceneTargets::default(), viewport, Timestamp(0.0))?;
    let mut frame_loop = FrameLoop::new(scene, ManualClock::nominal());

    // Nudge the pointer off-center so the parallax offset shows up.
    frame_loop.dispatch(InputEvent::PointerMoved { x: 960.0, y: 200.0 })?;

    for i in 0..300u32 {
        let Some(frame) = frame_loop.tick() else { break };
        if i % 60 == 0 {
            let stars = frame.starfield.as_ref().map_or(0, |p| p.circles().count());
            let sprite = frame.sprite.expect("sprite target present");
            tracing::info!(
                tick = i,
                stars,
                sprite_x = sprite.translate.x,
                sprite_opacity = sprite.opacity,
                "frame"
            );
        }
    }

    // Losing and regaining focus restarts the flight from its entry edge.
    frame_loop.dispatch(InputEvent::FocusRegained {
        at: Timestamp(300.0 * 16.7),
    })?;
    let frame = frame_loop.tick().expect("loop still running");
    let sprite = frame.sprite.expect("sprite target present");
    tracing::info!(sprite_x = sprite.translate.x, "after focus regained");

    let stats = frame_loop.stats();
    tracing::info!(frames = stats.frames_ticked, "done");
    Ok(())
}
