//! `abm-entity` — entity data types and the breed collection model for the
//! `rust_abm` toolkit.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                     |
//! |-----------|--------------------------------------------------------------|
//! | [`breed`] | `Breed` descriptor, `BreedDefaults`, `Overrides` bitset      |
//! | [`set`]   | `BreedSet` + `Breeds` — ordered sets with subset↔main dual-write and root-owned ID issue |
//! | [`agent`] | `Agent`, `Site` — mobile point entities                      |
//! | [`link`]  | `Link` — an edge between two agents                          |
//!
//! # The membership model
//!
//! Every entity belongs to exactly one breed subset and, transitively, to
//! the root ("main") set of its family.  Insertion and removal on a subset
//! dual-write to the root in the same call, so the root always equals the
//! union of its subsets.  Only the root issues IDs, monotonically, and only
//! for items that don't already carry one — so re-breeding never changes an
//! entity's identity.

pub mod agent;
pub mod breed;
pub mod link;
pub mod set;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::{Agent, Site};
pub use breed::{Breed, BreedDefaults, Overrides};
pub use link::Link;
pub use set::{BreedSet, Breeds};
