//! Fluent builder for constructing a [`Simulation`].

use abm_core::SimRng;
use abm_anim::{Animator, Clock, Driver, SystemClock};
use abm_render::{DrawSurface, NullSurface, PenTrail};
use abm_world::WorldState;

use crate::config::SimConfig;
use crate::model::{Ctx, Model};
use crate::sim::{RefreshFlags, Simulation};
use crate::SimResult;

/// Fluent builder for [`Simulation<M, S, C>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — world bounds, pacing, seed
/// - `M: Model` — the application's setup/step logic
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                               |
/// |-----------------|---------------------------------------|
/// | `.surface(s)`   | [`NullSurface`] (headless)            |
/// | `.clock(c)`     | [`SystemClock`] (real time)           |
/// | `.ready_when(f)`| always ready                          |
///
/// `build()` validates the configuration, constructs the world, and runs
/// the model's `setup` once.
pub struct SimulationBuilder<M, S, C> {
    config:    SimConfig,
    model:     M,
    surface:   S,
    clock:     C,
    readiness: Option<Box<dyn FnMut() -> bool>>,
}

impl<M: Model> SimulationBuilder<M, NullSurface, SystemClock> {
    pub fn new(config: SimConfig, model: M) -> Self {
        Self {
            config,
            model,
            surface: NullSurface,
            clock: SystemClock::new(),
            readiness: None,
        }
    }
}

impl<M, S, C> SimulationBuilder<M, S, C>
where
    M: Model,
    S: DrawSurface + PenTrail,
    C: Clock,
{
    /// Swap in a drawing surface (patch, link, and agent layers all go
    /// through it).
    pub fn surface<S2: DrawSurface + PenTrail>(self, surface: S2) -> SimulationBuilder<M, S2, C> {
        SimulationBuilder {
            config: self.config,
            model: self.model,
            surface,
            clock: self.clock,
            readiness: self.readiness,
        }
    }

    /// Swap in a clock — [`abm_anim::ManualClock`] turns `run_for_ms`
    /// into the headless batch path.
    pub fn clock<C2: Clock>(self, clock: C2) -> SimulationBuilder<M, S, C2> {
        SimulationBuilder {
            config: self.config,
            model: self.model,
            surface: self.surface,
            clock,
            readiness: self.readiness,
        }
    }

    /// Install an external readiness predicate.  The simulation polls it
    /// once per second and performs no step until it returns `true`.
    pub fn ready_when(mut self, predicate: impl FnMut() -> bool + 'static) -> Self {
        self.readiness = Some(Box::new(predicate));
        self
    }

    /// Validate the configuration, build the world, run `setup`, and
    /// return a stopped, ready-to-start [`Simulation`].
    pub fn build(self) -> SimResult<Simulation<M, S, C>> {
        let world = self.config.world()?;
        let mut state = WorldState::new(world);
        let mut rng = SimRng::new(self.config.seed);
        let mut model = self.model;

        let mut ctx = Ctx { world: &mut state, rng: &mut rng };
        model.setup(&mut ctx)?;

        let animator = Animator::new(
            self.config.rate,
            self.config.is_multi_step(),
            self.config.headless,
        );

        Ok(Simulation {
            config: self.config,
            world: state,
            model,
            surface: self.surface,
            rng,
            clock: self.clock,
            driver: Driver::new(),
            animator,
            refresh: RefreshFlags::default(),
            readiness: self.readiness,
            ready: false,
            readiness_timer: None,
        })
    }
}
