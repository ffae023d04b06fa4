//! `abm-grid` — the patch grid for the `rust_abm` toolkit.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`patch`] | `Patch` — one grid cell: color, resident agents, cache     |
//! | [`query`] | `NeighborQuery`, `CachePolicy` — normalized query keys     |
//! | [`grid`]  | `PatchGrid` — population, lookup, neighborhoods, diffusion |
//!
//! # The index bijection
//!
//! Patches are stored flat in row-major order, y descending from `max.y`,
//! x ascending from `min.x`, so that
//!
//! ```text
//! index = (x - min.x) + width * (max.y - y)
//! ```
//!
//! maps any in-range cell to its patch in O(1).  This formula is a contract:
//! point-to-patch lookup, the pixel-grid draw order, and the diffusion
//! kernel all rely on it.

pub mod grid;
pub mod patch;
pub mod query;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use grid::PatchGrid;
pub use patch::Patch;
pub use query::{CachePolicy, NeighborQuery};
