//! `abm-world` — world state composition and every cross-entity operation
//! of the `rust_abm` toolkit.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`state`]     | `WorldState` — grid + arenas + breed families, accessors  |
//! | [`lifecycle`] | create / hatch / sprout / link / kill / clear / re-breed  |
//! | [`motion`]    | move, move-off, forward, rotate, face, distance, pen trails |
//! | [`query`]     | agent neighbor queries, radius/cone filters, link traversal, set statistics |
//!
//! # Ownership model
//!
//! Agents and links live in arenas keyed by their typed IDs; every
//! cross-reference (agent ↔ patch, link ↔ endpoints) is an ID resolved
//! through `WorldState`.  No entity holds a pointer to another, so there
//! are no reference cycles to manage and state serializes flat.

pub mod lifecycle;
pub mod motion;
pub mod query;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use motion::PenStroke;
pub use state::WorldState;
