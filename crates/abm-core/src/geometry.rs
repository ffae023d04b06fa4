//! Pure geometric predicates: distance, angle, and cone membership, in both
//! Euclidean and toroidal flavors.
//!
//! # Toroidal space
//!
//! On a torus every point has up to four relevant images of a target point:
//! the target itself plus its reflections across the x seam, the y seam, and
//! both.  Distance takes the per-axis minimum of direct and wrapped spans;
//! angle aims at the closest image; cone membership holds if it holds for
//! *any* image.
//!
//! All functions are total over finite inputs.  NaN propagates as NaN (the
//! predicates then return `false`) but never panics.

use std::f64::consts::PI;

use crate::Point;

/// The minimal world descriptor the geometry functions need — whether space
/// wraps and how large one period is.  Built by `World::topology()`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Topology {
    pub is_torus: bool,
    /// World width in patch units (one full x period on a torus).
    pub width: f64,
    /// World height in patch units (one full y period on a torus).
    pub height: f64,
}

// ── Scalar helpers ────────────────────────────────────────────────────────────

/// Floored modulo: result always in `[0, modulo)` for positive `modulo`.
#[inline]
pub fn modulo(number: f64, modulo: f64) -> f64 {
    ((number % modulo) + modulo) % modulo
}

/// Wrap `number` into the half-open interval `[min, max)`.
#[inline]
pub fn wrap(number: f64, min: f64, max: f64) -> f64 {
    min + modulo(number - min, max - min)
}

/// Clamp `number` into the closed interval `[min, max]`.
#[inline]
pub fn clamp(number: f64, min: f64, max: f64) -> f64 {
    number.max(min).min(max)
}

/// Signed angular difference `radians1 - radians2`, normalized into
/// `(-π, π]`.
#[inline]
pub fn subtract_radians(radians1: f64, radians2: f64) -> f64 {
    let mut angle = radians1 - radians2;
    if angle <= -PI {
        angle += 2.0 * PI;
    }
    if angle > PI {
        angle -= 2.0 * PI;
    }
    angle
}

// ── Distance ──────────────────────────────────────────────────────────────────

/// Distance from `point1` to `point2` under the given topology.
pub fn distance(point1: Point, point2: Point, topology: Topology) -> f64 {
    if topology.is_torus {
        distance_torus(point1, point2, topology)
    } else {
        distance_euclidean(point1, point2)
    }
}

/// Straight-line distance, ignoring any wrapping.
#[inline]
pub fn distance_euclidean(point1: Point, point2: Point) -> f64 {
    let dx = point1.x - point2.x;
    let dy = point1.y - point2.y;
    (dx * dx + dy * dy).sqrt()
}

/// Shortest distance on a torus: per-axis minimum of the direct span and the
/// wrapped span, then the Euclidean norm of those minima.
pub fn distance_torus(point1: Point, point2: Point, topology: Topology) -> f64 {
    let dx = (point2.x - point1.x).abs();
    let dy = (point2.y - point1.y).abs();
    let min_x = dx.min(topology.width - dx);
    let min_y = dy.min(topology.height - dy);
    (min_x * min_x + min_y * min_y).sqrt()
}

// ── Angle ─────────────────────────────────────────────────────────────────────

/// Heading from `point1` toward `point2` (toward its closest image on a
/// torus), in radians.
pub fn angle(point1: Point, point2: Point, topology: Topology) -> f64 {
    if topology.is_torus {
        angle_euclidean(point1, closest_torus_point(point1, point2, topology))
    } else {
        angle_euclidean(point1, point2)
    }
}

#[inline]
pub fn angle_euclidean(point1: Point, point2: Point) -> f64 {
    (point2.y - point1.y).atan2(point2.x - point1.x)
}

// ── Cone membership ───────────────────────────────────────────────────────────

/// Is `point2` within the vision cone of an observer at `point1` facing
/// `heading`, with total angular width `cone` and reach `radius`?
///
/// On a torus the test passes if it passes for any of the four periodic
/// images of `point2`.
pub fn in_cone(
    heading:  f64,
    cone:     f64,
    radius:   f64,
    point1:   Point,
    point2:   Point,
    topology: Topology,
) -> bool {
    if topology.is_torus {
        torus4_points(point1, point2, topology)
            .iter()
            .any(|&image| in_cone_euclidean(heading, cone, radius, point1, image))
    } else {
        in_cone_euclidean(heading, cone, radius, point1, point2)
    }
}

pub fn in_cone_euclidean(
    heading: f64,
    cone:    f64,
    radius:  f64,
    point1:  Point,
    point2:  Point,
) -> bool {
    if radius < distance_euclidean(point1, point2) {
        return false;
    }
    let angle = angle_euclidean(point1, point2);
    cone / 2.0 >= subtract_radians(heading, angle).abs()
}

// ── Torus reflection ──────────────────────────────────────────────────────────

/// Reflect `point2` across the x and y seams nearest `point1`: the image
/// coordinates one period toward `point1`.
pub fn torus_reflect(point1: Point, point2: Point, topology: Topology) -> (f64, f64) {
    let x_reflected = if point2.x < point1.x {
        point2.x + topology.width
    } else {
        point2.x - topology.width
    };
    let y_reflected = if point2.y < point1.y {
        point2.y + topology.height
    } else {
        point2.y - topology.height
    };
    (x_reflected, y_reflected)
}

/// The four periodic images of `point2` relevant to an observer at `point1`:
/// the point itself, its x reflection, its y reflection, and both.
pub fn torus4_points(point1: Point, point2: Point, topology: Topology) -> [Point; 4] {
    let (x_reflected, y_reflected) = torus_reflect(point1, point2, topology);
    [
        point2,
        Point::new(x_reflected, point2.y),
        Point::new(point2.x, y_reflected),
        Point::new(x_reflected, y_reflected),
    ]
}

/// Of the four periodic images of `point2`, the one closest to `point1`
/// (chosen independently per axis).
pub fn closest_torus_point(point1: Point, point2: Point, topology: Topology) -> Point {
    let (x_reflected, y_reflected) = torus_reflect(point1, point2, topology);
    let x = if (x_reflected - point1.x).abs() < (point2.x - point1.x).abs() {
        x_reflected
    } else {
        point2.x
    };
    let y = if (y_reflected - point1.y).abs() < (point2.y - point1.y).abs() {
        y_reflected
    } else {
        point2.y
    };
    Point::new(x, y)
}
