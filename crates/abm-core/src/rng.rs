//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! The original toolkit this engine descends from patched a process-global
//! random function to get reproducible runs.  Here the generator is an
//! explicit `SimRng` instance owned by the simulation and threaded through
//! every call site that needs randomness — the same seed always produces the
//! same run, and nothing process-wide is ever mutated.
//!
//! Child generators (`SimRng::child`) are seeded by mixing the parent stream
//! with a golden-ratio constant so derived streams never collide.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level deterministic RNG.
///
/// Single-threaded by design — the animation loop never runs two steps
/// concurrently, so one generator per simulation suffices.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — useful for
    /// giving a demo or test its own stream without disturbing the parent.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }

    /// Choose a random element from a slice.  Returns `None` if empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    // ── Modeling distribution helpers ─────────────────────────────────────

    /// Uniform float in `[0, max)`.
    #[inline]
    pub fn random_float(&mut self, max: f64) -> f64 {
        self.0.gen_range(0.0..max)
    }

    /// Gaussian sample via Box-Muller.
    pub fn random_normal(&mut self, mean: f64, standard_deviation: f64) -> f64 {
        let u1: f64 = 1.0 - self.0.r#gen::<f64>();
        let u2: f64 = self.0.r#gen();
        let normal = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        normal * standard_deviation + mean
    }

    /// Uniform float centered on zero: `[-r/2, r/2)`.
    #[inline]
    pub fn random_centered(&mut self, r: f64) -> f64 {
        self.0.gen_range(-r / 2.0..r / 2.0)
    }

    /// `true` roughly once every `number` calls.
    #[inline]
    pub fn once_every(&mut self, number: u32) -> bool {
        self.0.gen_range(0..number.max(1)) == 1
    }
}
