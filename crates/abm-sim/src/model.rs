//! The model contract: what an application implements.

use abm_core::{AbmResult, SimRng};
use abm_world::WorldState;

/// What a model callback can touch: the world and the run's RNG.
pub struct Ctx<'a> {
    pub world: &'a mut WorldState,
    pub rng:   &'a mut SimRng,
}

/// A simulation model: populate the world once, then advance it one step
/// at a time.  Errors propagate to the animator, which faults and stops.
pub trait Model {
    fn setup(&mut self, ctx: &mut Ctx<'_>) -> AbmResult<()>;
    fn step(&mut self, ctx: &mut Ctx<'_>) -> AbmResult<()>;
}

/// Does nothing.  Placeholder for runner-level tests.
pub struct NoopModel;

impl Model for NoopModel {
    fn setup(&mut self, _ctx: &mut Ctx<'_>) -> AbmResult<()> {
        Ok(())
    }

    fn step(&mut self, _ctx: &mut Ctx<'_>) -> AbmResult<()> {
        Ok(())
    }
}
