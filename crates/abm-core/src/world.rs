//! The world coordinate system: integer grid corners, half-unit-padded
//! continuous bounds, and the clamp-or-wrap policy for out-of-range points.
//!
//! # Invariants
//!
//! - `width  = max.x - min.x + 1`, `height = max.y - min.y + 1`.
//! - Every patch coordinate is an integer in `[min, max]` per axis.
//! - Every continuous position lies in `[min_coordinate, max_coordinate]`
//!   (clamped) or is periodic modulo width/height (torus).
//!
//! `World` is immutable for the life of a simulation instance; `patch_size`
//! only matters to rendering (pixels per patch unit).

use crate::error::{AbmError, AbmResult};
use crate::geometry::{self, Topology};
use crate::point::{Cell, Point};
use crate::rng::SimRng;

/// The immutable coordinate system shared by the grid and every entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    /// Lowest-valued grid corner (inclusive).
    pub min: Cell,
    /// Highest-valued grid corner (inclusive).
    pub max: Cell,
    /// Grid columns: `max.x - min.x + 1`.
    pub width: u32,
    /// Grid rows: `max.y - min.y + 1`.
    pub height: u32,
    /// Continuous lower bound: `min - 0.5` per axis.
    pub min_coordinate: Point,
    /// Continuous upper bound: `max + 0.5` per axis.
    pub max_coordinate: Point,
    /// Pixels per patch unit — rendering only, never simulation logic.
    pub patch_size: f64,
    /// Wrap coordinates at the boundary instead of clamping.
    pub is_torus: bool,
}

impl World {
    /// Construct a world from explicit grid corners.
    ///
    /// Fails fast with [`AbmError::Config`] on inverted corners or a
    /// non-positive patch size — bad world geometry is never silently fixed.
    pub fn new(min: Cell, max: Cell, patch_size: f64, is_torus: bool) -> AbmResult<Self> {
        if max.x < min.x || max.y < min.y {
            return Err(AbmError::Config(format!(
                "world max {max} must not be below min {min}"
            )));
        }
        if !(patch_size > 0.0) {
            return Err(AbmError::Config(format!(
                "patch size must be positive, got {patch_size}"
            )));
        }
        let width = (max.x - min.x + 1) as u32;
        let height = (max.y - min.y + 1) as u32;
        Ok(Self {
            min,
            max,
            width,
            height,
            min_coordinate: Point::new(min.x as f64 - 0.5, min.y as f64 - 0.5),
            max_coordinate: Point::new(max.x as f64 + 0.5, max.y as f64 + 0.5),
            patch_size,
            is_torus,
        })
    }

    /// Construct a world centered on the origin with roughly `map_size`
    /// patches per side (the classic square-world shorthand).
    ///
    /// An even `map_size` shifts the minimum corner up by one so the span
    /// stays exactly `map_size` cells, e.g. 32 → `[-15, 16]`.
    pub fn centered(map_size: u32, patch_size: f64, is_torus: bool) -> AbmResult<Self> {
        if map_size == 0 {
            return Err(AbmError::Config("map size must be at least 1".into()));
        }
        let half = (map_size / 2) as i32;
        let shift = if map_size % 2 == 0 { 1 } else { 0 };
        Self::new(
            Cell::new(-half + shift, -half + shift),
            Cell::new(half, half),
            patch_size,
            is_torus,
        )
    }

    // ── Derived views ─────────────────────────────────────────────────────

    /// The descriptor the pure geometry functions consume.
    #[inline]
    pub fn topology(&self) -> Topology {
        Topology {
            is_torus: self.is_torus,
            width: self.width as f64,
            height: self.height as f64,
        }
    }

    /// Rendered width in pixels.
    #[inline]
    pub fn px_width(&self) -> f64 {
        self.width as f64 * self.patch_size
    }

    /// Rendered height in pixels.
    #[inline]
    pub fn px_height(&self) -> f64 {
        self.height as f64 * self.patch_size
    }

    // ── Coordinate policy ─────────────────────────────────────────────────

    /// Resolve an arbitrary point into valid world bounds: wrap per axis on
    /// a torus, clamp per axis otherwise.  Total — there is no out-of-range
    /// error anywhere in the toolkit.
    pub fn coordinate(&self, point: Point) -> Point {
        if self.is_torus {
            self.wrap_point(point)
        } else {
            self.clamp_point(point)
        }
    }

    /// Clamp both axes into `[min_coordinate, max_coordinate]`.
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            geometry::clamp(point.x, self.min_coordinate.x, self.max_coordinate.x),
            geometry::clamp(point.y, self.min_coordinate.y, self.max_coordinate.y),
        )
    }

    /// Wrap both axes modulo the world period into
    /// `[min_coordinate, max_coordinate)`.
    pub fn wrap_point(&self, point: Point) -> Point {
        Point::new(
            geometry::wrap(point.x, self.min_coordinate.x, self.max_coordinate.x),
            geometry::wrap(point.y, self.min_coordinate.y, self.max_coordinate.y),
        )
    }

    /// `true` if `point` already lies within the continuous bounds.
    pub fn is_inside(&self, point: Point) -> bool {
        self.min_coordinate.x <= point.x
            && point.x <= self.max_coordinate.x
            && self.min_coordinate.y <= point.y
            && point.y <= self.max_coordinate.y
    }

    /// `true` if `cell` touches any grid boundary.
    pub fn is_edge_cell(&self, cell: Cell) -> bool {
        cell.x == self.min.x || cell.x == self.max.x || cell.y == self.min.y || cell.y == self.max.y
    }

    /// A uniformly random continuous point within the world bounds.
    pub fn random_point(&self, rng: &mut SimRng) -> Point {
        Point::new(
            rng.gen_range(self.min_coordinate.x..self.max_coordinate.x),
            rng.gen_range(self.min_coordinate.y..self.max_coordinate.y),
        )
    }

    // ── Pixel transforms (rendering only) ─────────────────────────────────

    /// Patch-space point → pixel-space point (y inverted: pixel y grows
    /// downward).
    pub fn patch_to_pixel(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.min_coordinate.x) * self.patch_size,
            (self.max_coordinate.y - point.y) * self.patch_size,
        )
    }

    /// Pixel-space point → patch-space point.
    pub fn pixel_to_patch(&self, point: Point) -> Point {
        Point::new(
            self.min_coordinate.x + point.x / self.patch_size,
            self.max_coordinate.y - point.y / self.patch_size,
        )
    }
}
