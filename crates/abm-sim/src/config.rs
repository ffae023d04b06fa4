//! Run configuration.

use abm_core::{Cell, World};

use crate::{SimError, SimResult};

/// Everything needed to build a world and pace a run.
///
/// Bounds come either from explicit `min`/`max` corners or, when those are
/// absent, from `map_size` (a centered square).  `multi_step` left unset
/// follows `headless`: batch runs step on the fast timer, interactive runs
/// step once per frame.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    pub min: Option<Cell>,
    pub max: Option<Cell>,
    /// Side length of the centered square world used when no explicit
    /// bounds are given.
    pub map_size: u32,
    /// Pixels per patch.
    pub patch_size: f64,
    pub is_torus: bool,
    pub headless: bool,
    /// Target steps (and draws) per second.
    pub rate: f64,
    pub multi_step: Option<bool>,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            map_size: 32,
            patch_size: 13.0,
            is_torus: false,
            headless: false,
            rate: 30.0,
            multi_step: None,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Resolve the pacing strategy.
    pub fn is_multi_step(&self) -> bool {
        self.multi_step.unwrap_or(self.headless)
    }

    /// Validate and build the world this configuration describes.
    pub fn world(&self) -> SimResult<World> {
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(SimError::Config(format!("rate must be positive, got {}", self.rate)));
        }
        let world = match (self.min, self.max) {
            (Some(min), Some(max)) => World::new(min, max, self.patch_size, self.is_torus),
            (None, None) => World::centered(self.map_size, self.patch_size, self.is_torus),
            _ => {
                return Err(SimError::Config(
                    "bounds need both min and max, or neither".into(),
                ));
            }
        };
        Ok(world?)
    }
}
