//! `abm-sim` — the top of the `rust_abm` stack: configuration, the model
//! contract, and the simulation runner that ties world, animator, and
//! drawing surface together.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`config`]  | `SimConfig` — validated run configuration                 |
//! | [`model`]   | `Model` trait + `Ctx`, `NoopModel`                        |
//! | [`builder`] | `SimulationBuilder` — fluent construction                 |
//! | [`sim`]     | `Simulation` — lifecycle, the drive loop, draw dispatch   |
//! | [`error`]   | `SimError` / `SimResult`                                  |
//!
//! # Example
//!
//! ```rust,ignore
//! let mut sim = SimulationBuilder::new(SimConfig::default(), MyModel::new())
//!     .clock(ManualClock::new())
//!     .build()?;
//! sim.start();
//! sim.run_for_ms(1000)?;
//! println!("{} ticks", sim.animator().ticks());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimulationBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use model::{Ctx, Model, NoopModel};
pub use sim::{RefreshFlags, Simulation};
