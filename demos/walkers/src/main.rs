//! walkers — smallest example for the rust_abm toolkit.
//!
//! A hundred agents wander a 41×41 torus, wiggling their headings each
//! tick and diffusing a heat field wherever they stand.  Runs headless on
//! a manual clock for 10 simulated seconds, then prints throughput and a
//! few world statistics.

use std::time::Instant;

use anyhow::Result;

use abm_core::{AbmResult, Cell, Color, Shape};
use abm_anim::ManualClock;
use abm_entity::BreedDefaults;
use abm_sim::{Ctx, Model, SimConfig, SimulationBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const WALKER_COUNT: usize = 100;
const SEED: u64 = 42;
const SIM_SECONDS: u64 = 10;
const RATE: f64 = 30.0;
const WIGGLE: f64 = 0.5; // max heading change per tick, radians
const HEAT_RATE: f64 = 0.05;

// ── Model ─────────────────────────────────────────────────────────────────────

struct WalkerModel {
    heat: Vec<f64>,
}

impl WalkerModel {
    fn new() -> Self {
        Self { heat: Vec::new() }
    }
}

impl Model for WalkerModel {
    fn setup(&mut self, ctx: &mut Ctx<'_>) -> AbmResult<()> {
        self.heat = vec![0.0; ctx.world.grid().len()];

        let walkers = ctx.world.add_agent_breed(
            "walkers",
            BreedDefaults {
                color: Some(Color::YELLOW),
                shape: Some(Shape::Bug),
                ..Default::default()
            },
        );
        ctx.world.create_agents(walkers, WALKER_COUNT, |world, id| {
            let position = world.world().random_point(ctx.rng);
            let _ = world.move_to(id, position);
        })?;
        for id in ctx.world.members(walkers) {
            let heading = ctx.rng.random_float(std::f64::consts::TAU);
            ctx.world.agent_mut(id)?.set_heading(heading);
        }
        Ok(())
    }

    fn step(&mut self, ctx: &mut Ctx<'_>) -> AbmResult<()> {
        let walkers = ctx.world.agent_breeds().require("walkers")?;
        for id in ctx.world.members(walkers) {
            ctx.world.rotate(id, ctx.rng.random_centered(WIGGLE))?;
            ctx.world.forward(id, 1.0, false)?;
            if let Some(patch) = ctx.world.agent(id)?.patch() {
                self.heat[patch.index()] += 1.0;
            }
        }
        ctx.world.grid_mut().diffuse(&mut self.heat, HEAT_RATE);
        Ok(())
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = SimConfig {
        min: Some(Cell { x: -20, y: -20 }),
        max: Some(Cell { x: 20, y: 20 }),
        is_torus: true,
        headless: true,
        rate: RATE,
        seed: SEED,
        ..Default::default()
    };

    let mut sim = SimulationBuilder::new(config, WalkerModel::new())
        .clock(ManualClock::new())
        .build()?;

    let wall = Instant::now();
    sim.start();
    sim.run_for_ms(SIM_SECONDS * 1000)?;
    let elapsed = wall.elapsed();

    let ticks = sim.animator().ticks();
    println!(
        "{ticks} ticks over {SIM_SECONDS} simulated seconds in {:.1} ms wall",
        elapsed.as_secs_f64() * 1000.0
    );

    let walkers = sim.world().agent_breeds().require("walkers")?;
    let mean_x = sim.world().mean_of(walkers, |a| {
        a.position().map(|p| p.x).unwrap_or(0.0)
    })?;
    let total_heat: f64 = sim.model().heat.iter().sum();
    println!(
        "{} walkers, mean x {mean_x:.2}, heat deposited {total_heat:.0}",
        sim.world().agent_count()
    );

    Ok(())
}
