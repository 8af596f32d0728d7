use rand::{SeedableRng, rngs::StdRng};

use crate::flight::animator::FlightAnimator;
use crate::flight::path::SpritePose;
use crate::foundation::core::{Timestamp, Viewport};
use crate::foundation::error::{StardriftError, StardriftResult};
use crate::render::plan::FramePlan;
use crate::runtime::input::InputEvent;
use crate::scene::config::SceneConfig;
use crate::starfield::engine::Starfield;

/// Which host page regions exist at startup.
///
/// An absent target silently disables the matching subsystem; it is not an
/// error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneTargets {
    /// The drawing surface for the starfield is present.
    pub surface: bool,
    /// The sprite element for the flight animation is present.
    pub sprite: bool,
}

impl Default for SceneTargets {
    fn default() -> Self {
        Self {
            surface: true,
            sprite: true,
        }
    }
}

/// Output of one scene tick.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SceneFrame {
    /// Draw plan for the starfield surface, if that engine is live.
    pub starfield: Option<FramePlan>,
    /// Sprite pose for this frame, if the flight engine is live.
    pub sprite: Option<SpritePose>,
}

/// The composed background scene: starfield + flight, wired to host events.
///
/// The engines are independent and never communicate; they are composed only
/// by starting from the same entry point and ticking on the same frame
/// callback.
pub struct Scene {
    viewport: Viewport,
    starfield: Option<Starfield>,
    flight: Option<FlightAnimator>,
}

impl Scene {
    /// Build the scene for a page.
    ///
    /// A disabled config or an absent target yields the corresponding engine
    /// as a startup-time no-op; `start` seeds the flight's time origin.
    pub fn new(
        config: &SceneConfig,
        targets: SceneTargets,
        viewport: Viewport,
        start: Timestamp,
    ) -> StardriftResult<Self> {
        config.validate()?;

        if !config.animations_enabled {
            tracing::debug!("animations disabled by config; scene is inert");
            return Ok(Self {
                viewport,
                starfield: None,
                flight: None,
            });
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let starfield = if targets.surface {
            let engine_rng = StdRng::from_rng(&mut rng);
            Some(Starfield::new(
                config.layers.clone(),
                viewport,
                engine_rng,
            )?)
        } else {
            tracing::debug!("starfield surface missing; engine disabled");
            None
        };

        let flight = if targets.sprite {
            Some(match config.flight_period_ms {
                Some(period) => FlightAnimator::with_period(start, period)?,
                None => FlightAnimator::new(start, &mut rng),
            })
        } else {
            tracing::debug!("sprite element missing; flight disabled");
            None
        };

        Ok(Self {
            viewport,
            starfield,
            flight,
        })
    }

    /// Whether any engine will do work on tick. False means the frame loop
    /// should never be scheduled.
    pub fn is_animated(&self) -> bool {
        self.starfield.is_some() || self.flight.is_some()
    }

    /// Validate and dispatch one host event.
    ///
    /// Numeric host inputs are checked here so the frame path can stay
    /// infallible.
    pub fn handle_event(&mut self, event: InputEvent) -> StardriftResult<()> {
        match event {
            InputEvent::Resized { width, height, dpr } => {
                let viewport = Viewport::new(width, height, dpr)?;
                self.viewport = viewport;
                if let Some(starfield) = &mut self.starfield {
                    starfield.resize(viewport);
                }
            }
            InputEvent::PointerMoved { x, y } => {
                if !x.is_finite() || !y.is_finite() {
                    return Err(StardriftError::validation(
                        "pointer coordinates must be finite",
                    ));
                }
                if let Some(starfield) = &mut self.starfield {
                    starfield.pointer_moved(x, y);
                }
            }
            InputEvent::FocusRegained { at } => {
                let at = Timestamp::new(at.millis())?;
                if let Some(flight) = &mut self.flight {
                    flight.focus_regained(at);
                }
            }
        }
        Ok(())
    }

    /// Advance both engines one frame and collect their outputs.
    #[tracing::instrument(skip(self), level = "trace")]
    pub fn tick(&mut self, now: Timestamp) -> SceneFrame {
        SceneFrame {
            starfield: self.starfield.as_mut().map(|s| s.frame(now)),
            sprite: self
                .flight
                .as_ref()
                .map(|f| f.advance(now, &self.viewport)),
        }
    }

    /// Current viewport (updated on resize, read by the flight each tick).
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The starfield engine, if live.
    pub fn starfield(&self) -> Option<&Starfield> {
        self.starfield.as_ref()
    }

    /// The flight animator, if live.
    pub fn flight(&self) -> Option<&FlightAnimator> {
        self.flight.as_ref()
    }

    /// The starfield engine, or a `MissingTarget` error for callers that
    /// cannot proceed without a surface (e.g. frame snapshots).
    pub fn require_starfield(&self) -> StardriftResult<&Starfield> {
        self.starfield
            .as_ref()
            .ok_or_else(|| StardriftError::missing_target("starfield surface"))
    }
}
