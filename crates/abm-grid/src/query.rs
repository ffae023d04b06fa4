//! Normalized neighbor-query parameters.
//!
//! Query results are cached per patch keyed by the query itself, so the key
//! must be `Eq + Hash`.  Floating-point parameters (radius, heading, cone
//! width) are keyed by their bit patterns — two queries hit the same cache
//! entry exactly when their parameters are bit-identical, which is what
//! "normalized query parameters" means here.

/// A patch-neighborhood query shape.
///
/// All variants exclude the queried patch itself unless `me_too` is set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NeighborQuery {
    /// Chebyshev neighborhood: all patches within `range` cells on both
    /// axes (range 1 = the classic 8 surrounding cells).
    Square { range: u32, me_too: bool },

    /// Manhattan neighborhood: all patches whose row + column offsets sum
    /// to at most `range`.
    Diamond { range: u32, me_too: bool },

    /// Euclidean neighborhood: square at `ceil(radius)` filtered by exact
    /// center-to-center distance.
    Radius { radius: F64Key, me_too: bool },

    /// Radius further filtered by an angular window of total width `cone`
    /// around `heading`.
    Cone {
        radius:  F64Key,
        heading: F64Key,
        cone:    F64Key,
        me_too:  bool,
    },
}

impl NeighborQuery {
    /// The 8-cell default neighborhood.
    pub const ADJACENT8: NeighborQuery = NeighborQuery::Square { range: 1, me_too: false };

    pub fn square(range: u32) -> Self {
        NeighborQuery::Square { range, me_too: false }
    }

    pub fn diamond(range: u32) -> Self {
        NeighborQuery::Diamond { range, me_too: false }
    }

    pub fn radius(radius: f64) -> Self {
        NeighborQuery::Radius { radius: F64Key::new(radius), me_too: false }
    }

    pub fn cone(radius: f64, heading: f64, cone: f64) -> Self {
        NeighborQuery::Cone {
            radius:  F64Key::new(radius),
            heading: F64Key::new(heading),
            cone:    F64Key::new(cone),
            me_too:  false,
        }
    }

    /// Same query with the center patch included.
    pub fn with_me_too(self) -> Self {
        match self {
            NeighborQuery::Square { range, .. } => NeighborQuery::Square { range, me_too: true },
            NeighborQuery::Diamond { range, .. } => NeighborQuery::Diamond { range, me_too: true },
            NeighborQuery::Radius { radius, .. } => NeighborQuery::Radius { radius, me_too: true },
            NeighborQuery::Cone { radius, heading, cone, .. } => {
                NeighborQuery::Cone { radius, heading, cone, me_too: true }
            }
        }
    }

    pub fn me_too(&self) -> bool {
        match *self {
            NeighborQuery::Square { me_too, .. }
            | NeighborQuery::Diamond { me_too, .. }
            | NeighborQuery::Radius { me_too, .. }
            | NeighborQuery::Cone { me_too, .. } => me_too,
        }
    }
}

/// How a query interacts with the per-patch result cache.
///
/// Patch adjacency is static, so cached entries are valid for the patch's
/// whole lifetime.  Cone results are cached only on request because their
/// keys include a continuous heading — callers sweeping a vision cone would
/// otherwise fill the cache with single-use entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Cache square/diamond/radius results; compute cone results fresh.
    #[default]
    Default,
    /// Cache every shape, cone included.
    Always,
    /// Bypass the cache entirely (exploratory one-off queries).
    Never,
}

impl CachePolicy {
    pub(crate) fn stores(self, query: &NeighborQuery) -> bool {
        match self {
            CachePolicy::Never => false,
            CachePolicy::Always => true,
            CachePolicy::Default => !matches!(query, NeighborQuery::Cone { .. }),
        }
    }
}

// ── F64Key ────────────────────────────────────────────────────────────────────

/// An `f64` made hashable by keying on its bit pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct F64Key(u64);

impl F64Key {
    #[inline]
    pub fn new(value: f64) -> Self {
        F64Key(value.to_bits())
    }

    #[inline]
    pub fn get(self) -> f64 {
        f64::from_bits(self.0)
    }
}
