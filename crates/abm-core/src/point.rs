//! Continuous and grid coordinate types.
//!
//! `Point` is an `f64` continuous position — agents move through continuous
//! space even though the background grid is integer-celled.  `Cell` is an
//! integer patch coordinate.  Grids in this toolkit are small (tens to
//! hundreds of cells per side) so double precision costs nothing and keeps
//! angle arithmetic exact enough for cone tests.

use std::fmt;

// ── Point ─────────────────────────────────────────────────────────────────────

/// A continuous 2-D position in world units (patch widths).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round to the nearest grid cell.
    ///
    /// Rounding rule: **half away from zero** (`f64::round`), so `0.5 → 1`
    /// and `-0.5 → -1`.  This differs from JS `Math.round` (half up) only at
    /// exact `.5` boundaries on negative axes; the rule here is the one the
    /// grid tests pin down.
    #[inline]
    pub fn round_to_cell(self) -> Cell {
        Cell {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
        }
    }
}

impl From<Cell> for Point {
    #[inline]
    fn from(cell: Cell) -> Point {
        Point { x: cell.x as f64, y: cell.y as f64 }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// An integer grid coordinate — the position of one patch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
