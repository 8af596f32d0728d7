use crate::foundation::error::StardriftResult;
use crate::runtime::clock::FrameClock;
use crate::runtime::input::InputEvent;
use crate::scene::compose::{Scene, SceneFrame};

/// Counters for a bounded or open-ended run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct LoopStats {
    /// Frames ticked since the loop was created.
    pub frames_ticked: u64,
}

/// The frame loop: owns a scene and a clock, ticks until stopped.
///
/// Stands in for the host's self-rescheduling frame callback, with an
/// observable stop so tests and demos can run a bounded number of ticks
/// deterministically. A scene with nothing to animate never starts running,
/// so a disabled build schedules zero frames.
pub struct FrameLoop<C: FrameClock> {
    scene: Scene,
    clock: C,
    running: bool,
    stats: LoopStats,
}

impl<C: FrameClock> FrameLoop<C> {
    /// Wrap a scene and a clock. Starts running only if the scene has at
    /// least one live engine.
    pub fn new(scene: Scene, clock: C) -> Self {
        let running = scene.is_animated();
        if !running {
            tracing::debug!("scene has no live engine; frame loop will not run");
        }
        Self {
            scene,
            clock,
            running,
            stats: LoopStats::default(),
        }
    }

    /// Whether the loop is still scheduling frames.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop scheduling; subsequent ticks are no-ops.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!(frames = self.stats.frames_ticked, "frame loop stopped");
        }
        self.running = false;
    }

    /// Forward one host event to the scene.
    pub fn dispatch(&mut self, event: InputEvent) -> StardriftResult<()> {
        self.scene.handle_event(event)
    }

    /// Run one frame callback: read the clock, tick the scene.
    ///
    /// Returns `None` once stopped (or never started).
    pub fn tick(&mut self) -> Option<SceneFrame> {
        if !self.running {
            return None;
        }
        let now = self.clock.now();
        self.stats.frames_ticked += 1;
        Some(self.scene.tick(now))
    }

    /// Tick up to `n` frames, discarding the outputs; returns the stats
    /// afterwards. Stops early if `stop` was observed.
    pub fn run_ticks(&mut self, n: u64) -> LoopStats {
        for _ in 0..n {
            if self.tick().is_none() {
                break;
            }
        }
        self.stats
    }

    /// Counters so far.
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// The scene being driven.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
