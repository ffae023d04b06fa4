//! `abm-core` — foundational types for the `rust_abm` agent-based-modeling
//! toolkit.
//!
//! This crate is a dependency of every other `abm-*` crate.  It intentionally
//! has no `abm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `PatchId`, `LinkId`, `BreedId`                |
//! | [`point`]    | `Point` (continuous), `Cell` (integer grid)              |
//! | [`geometry`] | distance / angle / cone tests, Euclidean and toroidal    |
//! | [`world`]    | `World` — bounds, clamp/wrap coordinate policy           |
//! | [`color`]    | `Color` (RGBA) with fail-fast name lookup                |
//! | [`shape`]    | `Shape` — the drawable agent silhouettes                 |
//! | [`rng`]      | `SimRng` — explicit seeded simulation RNG                |
//! | [`error`]    | `AbmError`, `AbmResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.    |

pub mod color;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod point;
pub mod rng;
pub mod shape;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use color::Color;
pub use error::{AbmError, AbmResult};
pub use geometry::Topology;
pub use ids::{AgentId, BreedId, LinkId, PatchId};
pub use point::{Cell, Point};
pub use rng::SimRng;
pub use shape::Shape;
pub use world::World;
