//! `Simulation` — lifecycle, the drive loop, and the draw pass.
//!
//! # Draw order
//!
//! Patches (one pixel-grid call) → pen trails → links → agents → labels,
//! each layer in collection order, hidden entities skipped.  Links on a
//! torus whose short path crosses the seam are drawn as two segments, one
//! leaving each endpoint toward the other's nearest periodic image.

use abm_core::{geometry, AbmResult, AgentId, LinkId, Point, SimRng};
use abm_anim::{Animated, Animator, Clock, Driver, Handle};
use abm_render::{DrawSurface, PenTrail};
use abm_world::WorldState;

use crate::config::SimConfig;
use crate::model::{Ctx, Model};
use crate::SimResult;

/// Which layers the draw pass repaints.  All on by default.
#[derive(Copy, Clone, Debug)]
pub struct RefreshFlags {
    pub patches: bool,
    pub links:   bool,
    pub agents:  bool,
}

impl Default for RefreshFlags {
    fn default() -> Self {
        Self { patches: true, links: true, agents: true }
    }
}

/// A complete runnable simulation.
///
/// Owns the world, the model, the drawing surface, and the scheduler
/// stack.  Construct through [`crate::SimulationBuilder`].
pub struct Simulation<M, S, C> {
    pub(crate) config:   SimConfig,
    pub(crate) world:    WorldState,
    pub(crate) model:    M,
    pub(crate) surface:  S,
    pub(crate) rng:      SimRng,
    pub(crate) clock:    C,
    pub(crate) driver:   Driver,
    pub(crate) animator: Animator,
    pub(crate) refresh:  RefreshFlags,

    /// External "resources loaded" predicate, polled before the first
    /// step.  `None` means always ready.
    pub(crate) readiness: Option<Box<dyn FnMut() -> bool>>,
    pub(crate) ready: bool,
    pub(crate) readiness_timer: Option<Handle>,
}

/// Poll interval for the readiness predicate.
const READINESS_POLL_MS: u64 = 1000;

impl<M, S, C> Simulation<M, S, C>
where
    M: Model,
    S: DrawSurface + PenTrail,
    C: Clock,
{
    // ── Introspection ─────────────────────────────────────────────────────

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn set_refresh(&mut self, refresh: RefreshFlags) {
        self.refresh = refresh;
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Begin continuous animation.  If a readiness predicate is installed
    /// and not yet satisfied, the animator starts only once a poll sees it
    /// turn true.
    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        if self.poll_readiness() {
            self.animator.start(now, &mut self.driver);
        } else if self.readiness_timer.is_none() {
            self.readiness_timer = Some(self.driver.set_timeout(now, READINESS_POLL_MS));
        }
    }

    /// Stop continuous animation, cancelling a pending readiness poll too.
    pub fn stop(&mut self) {
        if let Some(handle) = self.readiness_timer.take() {
            self.driver.cancel(handle);
        }
        self.animator.stop(&mut self.driver);
    }

    pub fn toggle(&mut self) {
        match self.animator.state() {
            abm_anim::RunState::Running => self.stop(),
            _ => self.start(),
        }
    }

    /// One forced step (and draw, unless headless).  The readiness gate
    /// still applies: before the predicate turns true this is a no-op, and
    /// a `start()` waiting on its poll keeps waiting.
    pub fn once(&mut self) -> SimResult<()> {
        if !self.poll_readiness() {
            return Ok(());
        }
        if let Some(handle) = self.readiness_timer.take() {
            self.driver.cancel(handle);
        }
        let mut target = StepDraw {
            world: &mut self.world,
            model: &mut self.model,
            rng: &mut self.rng,
            surface: &mut self.surface,
            refresh: self.refresh,
        };
        self.animator.once(&mut self.driver, &mut target)?;
        Ok(())
    }

    /// Back to the initial state: a fresh world from the stored
    /// configuration, the RNG re-seeded, counters zeroed, `setup` re-run.
    /// No callback scheduled before the reset can fire after it.
    pub fn reset(&mut self) -> SimResult<()> {
        self.stop();
        self.animator.reset(&mut self.driver);
        debug_assert!(self.driver.is_empty());

        self.world = WorldState::new(self.config.world()?);
        self.rng = SimRng::new(self.config.seed);
        self.ready = false;
        let mut ctx = Ctx { world: &mut self.world, rng: &mut self.rng };
        self.model.setup(&mut ctx)?;
        Ok(())
    }

    // ── The drive loop ────────────────────────────────────────────────────

    /// Drive pending callbacks for `ms` milliseconds of clock time.  With
    /// a `ManualClock` this is the headless batch path; with a
    /// `SystemClock` it runs in real time.
    pub fn run_for_ms(&mut self, ms: u64) -> SimResult<()> {
        let end = self.clock.now_ms() + ms;
        loop {
            let Some(deadline) = self.driver.next_deadline() else { break };
            if deadline > end {
                break;
            }
            self.clock.wait_until(deadline);
            let now = self.clock.now_ms();
            while let Some(handle) = self.driver.pop_due(now) {
                self.dispatch(handle, now)?;
            }
        }
        self.clock.wait_until(end);
        Ok(())
    }

    fn dispatch(&mut self, handle: Handle, now: u64) -> AbmResult<()> {
        if self.readiness_timer == Some(handle) {
            self.readiness_timer = None;
            if self.poll_readiness() {
                self.animator.start(now, &mut self.driver);
            } else {
                self.readiness_timer = Some(self.driver.set_timeout(now, READINESS_POLL_MS));
            }
            return Ok(());
        }
        let mut target = StepDraw {
            world: &mut self.world,
            model: &mut self.model,
            rng: &mut self.rng,
            surface: &mut self.surface,
            refresh: self.refresh,
        };
        self.animator.fire(handle, now, &mut self.driver, &mut target)
    }

    fn poll_readiness(&mut self) -> bool {
        if !self.ready {
            self.ready = match &mut self.readiness {
                Some(predicate) => predicate(),
                None => true,
            };
        }
        self.ready
    }
}

// ── Step/draw target ──────────────────────────────────────────────────────────

/// Disjoint borrow of the pieces a step or draw touches, so the animator
/// can drive them while the simulation keeps ownership.
struct StepDraw<'a, M, S> {
    world:   &'a mut WorldState,
    model:   &'a mut M,
    rng:     &'a mut SimRng,
    surface: &'a mut S,
    refresh: RefreshFlags,
}

impl<M: Model, S: DrawSurface + PenTrail> Animated for StepDraw<'_, M, S> {
    fn step(&mut self) -> AbmResult<()> {
        let mut ctx = Ctx { world: self.world, rng: self.rng };
        self.model.step(&mut ctx)
    }

    fn draw(&mut self) -> AbmResult<()> {
        draw_world(self.world, self.surface, self.refresh)
    }
}

/// One full draw pass over the world.
fn draw_world<S: DrawSurface + PenTrail>(
    world: &mut WorldState,
    surface: &mut S,
    refresh: RefreshFlags,
) -> AbmResult<()> {
    surface.clear();

    if refresh.patches {
        surface.draw_pixel_grid(&world.grid().patch_colors());
        for patch in world.grid().iter() {
            if patch.hidden {
                continue;
            }
            if let Some(label) = &patch.label {
                surface.draw_text(label, Point::from(patch.position), patch.color);
            }
        }
    }

    for stroke in world.take_pen_strokes() {
        surface.pen_stroke(stroke.from, stroke.to, stroke.color, stroke.size);
    }

    if refresh.links {
        let links: Vec<LinkId> =
            world.link_breeds().get(world.links_breed()).members().to_vec();
        for id in links {
            draw_link(world, surface, id)?;
        }
    }

    if refresh.agents {
        let agents: Vec<AgentId> =
            world.agent_breeds().get(world.agents_breed()).members().to_vec();
        for id in agents {
            let agent = world.agent(id)?;
            let (Some(position), false) = (agent.position(), agent.hidden) else {
                continue;
            };
            surface.draw_shape(agent.shape, position, agent.size, agent.heading, agent.color);
            if let Some(label) = &agent.label {
                surface.draw_text(label, position, agent.color);
            }
        }
    }

    Ok(())
}

fn draw_link<S: DrawSurface>(
    world: &WorldState,
    surface: &mut S,
    id: LinkId,
) -> AbmResult<()> {
    let link = world.link(id)?;
    if link.hidden {
        return Ok(());
    }
    let (Some(from), Some(to)) = (
        world.agent(link.from)?.position(),
        world.agent(link.to)?.position(),
    ) else {
        // Off-grid endpoint: nothing to draw this cycle.
        return Ok(());
    };

    let topology = world.world().topology();
    let crosses_seam = topology.is_torus
        && geometry::distance_euclidean(from, to) > geometry::distance_torus(from, to, topology);
    if crosses_seam {
        let image_of_to = geometry::closest_torus_point(from, to, topology);
        let image_of_from = geometry::closest_torus_point(to, from, topology);
        surface.draw_line(from, image_of_to, link.color, link.thickness);
        surface.draw_line(to, image_of_from, link.color, link.thickness);
    } else {
        surface.draw_line(from, to, link.color, link.thickness);
    }
    Ok(())
}
