//! `abm-anim` — the animation scheduler for `rust_abm`.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`clock`]    | `Clock` trait, `SystemClock`, `ManualClock`                |
//! | [`driver`]   | `Driver` — the pending-callback queue (timers and frames)  |
//! | [`animator`] | `Animator` state machine, pacing strategies, rate accounting |
//!
//! Progress is single-threaded and cooperative: the host drains the
//! [`Driver`] and hands each due [`driver::Handle`] to the
//! [`Animator`], which runs the model's step/draw callbacks and
//! reschedules itself.  No two callbacks ever overlap.

pub mod animator;
pub mod clock;
pub mod driver;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use animator::{Animated, Animator, RunState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::{Driver, Handle, FRAME_MS};
