//! Stardrift is a decorative background animation engine: a layered parallax
//! starfield plus a single sprite flying a looping path, driven by a
//! per-frame update loop.
//!
//! The host supplies viewport geometry, pointer positions, a focus signal and
//! a monotonic per-frame timestamp; the crate returns what to draw.
//!
//! # Pipeline overview
//!
//! 1. **Advance**: `Scene + Timestamp -> updated engine state` (star drift
//!    and wrap, flight phase)
//! 2. **Plan**: emit a backend-agnostic [`FramePlan`] for the starfield
//!    surface and a [`SpritePose`] for the sprite element
//! 3. **Execute** (optional): `FramePlan -> FrameRGBA` via [`SurfaceBackend`]
//!    (CPU backend included)
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Infallible frame path**: numeric host inputs are validated at the
//!   construction and event boundaries; per-frame work is pure arithmetic.
//! - **Single-threaded cooperative**: each engine's state is touched only
//!   from its own frame callback; events write fields the next tick reads.
//! - **Deterministic when seeded**: the random source is injected, so star
//!   sets and flight periods reproduce in tests; production draws OS entropy.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod flight;
mod foundation;
mod render;
mod runtime;
mod scene;
mod starfield;

pub use flight::animator::{FlightAnimator, PERIOD_MAX_MS, PERIOD_MIN_MS};
pub use flight::path::{SpritePose, fade_at, pose_at};
pub use foundation::core::{Affine, DPR_MAX, DPR_MIN, Point, Timestamp, Vec2, Viewport};
pub use foundation::error::{StardriftError, StardriftResult};
pub use render::backend::{FrameRGBA, SurfaceBackend};
pub use render::cpu::CpuBackend;
pub use render::plan::{CircleOp, DrawOp, FramePlan, Rgba, VignetteOp};
pub use runtime::clock::{FrameClock, ManualClock, MonotonicClock};
pub use runtime::frame_loop::{FrameLoop, LoopStats};
pub use runtime::input::InputEvent;
pub use scene::compose::{Scene, SceneFrame, SceneTargets};
pub use scene::config::SceneConfig;
pub use starfield::engine::Starfield;
pub use starfield::layer::{
    LAYER_COUNT, LayerSpec, NOMINAL_FRAME_SECS, default_layers, parallax_strength,
};
pub use starfield::star::{Star, TWINKLE_GAIN};
