//! Breed descriptors: the explicit replacement for runtime prototype
//! reassignment.
//!
//! A breed is a named subset of agents, patches, or links sharing default
//! attributes.  Instead of hanging defaults off a prototype chain, each
//! entity carries its `BreedId` plus an [`Overrides`] bitset recording which
//! attributes the modeler set explicitly; everything else renders with the
//! breed's defaults.

use abm_core::{BreedId, Color, Shape};

/// Default attribute values for members of one breed.  `None` means "no
/// breed opinion" — the entity keeps whatever value it has.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreedDefaults {
    pub color: Option<Color>,
    pub shape: Option<Shape>,
    pub size: Option<f64>,
    pub hidden: Option<bool>,
}

/// A breed descriptor: identity, name, position in the subset/superset
/// hierarchy, and member defaults.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Breed {
    pub id: BreedId,
    pub name: String,
    /// The superset this breed is a subset of; `None` makes this breed a
    /// root ("main") collection that issues IDs for its family.
    pub main: Option<BreedId>,
    pub defaults: BreedDefaults,
}

// ── Overrides ─────────────────────────────────────────────────────────────────

/// Bitset of per-entity attributes that were explicitly set and therefore
/// shadow breed defaults.
///
/// On re-breeding, bits whose attribute the *new* breed defines a default
/// for are cleared and the default re-applied — the entity "resets to breed
/// defaults" for exactly those attributes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Overrides(u8);

impl Overrides {
    pub const COLOR: Overrides = Overrides(1 << 0);
    pub const SHAPE: Overrides = Overrides(1 << 1);
    pub const SIZE: Overrides = Overrides(1 << 2);
    pub const HIDDEN: Overrides = Overrides(1 << 3);

    #[inline]
    pub fn set(&mut self, flag: Overrides) {
        self.0 |= flag.0;
    }

    #[inline]
    pub fn clear(&mut self, flag: Overrides) {
        self.0 &= !flag.0;
    }

    #[inline]
    pub fn contains(self, flag: Overrides) -> bool {
        self.0 & flag.0 != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
