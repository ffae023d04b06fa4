//! `abm-render` — the boundary between the simulation core and whatever
//! actually draws.
//!
//! The core never owns a canvas.  It calls [`DrawSurface`] once per
//! visible entity per draw cycle, in collection order, and forwards pen
//! trails to a [`PenTrail`] sink.  Two stock surfaces ship with the
//! crate: [`NullSurface`] for headless runs and [`RecordingSurface`] for
//! tests that assert on draw order and content.

use abm_core::{Color, Point, Shape};

pub mod record;

#[cfg(test)]
mod tests;

pub use record::{DrawOp, RecordingSurface};

// ── Boundary traits ───────────────────────────────────────────────────────────

/// What a rendering backend must provide.  `position` arguments are in
/// patch coordinates; the backend owns the pixel transform.
pub trait DrawSurface {
    fn clear(&mut self);
    fn draw_pixel_grid(&mut self, colors: &[Color]);
    fn draw_shape(
        &mut self,
        shape: Shape,
        position: Point,
        size: f64,
        heading: f64,
        color: Color,
    );
    fn draw_line(&mut self, from: Point, to: Point, color: Color, thickness: f64);
    fn draw_text(&mut self, text: &str, position: Point, color: Color);
}

/// Sink for agent pen trails.  Kept separate from [`DrawSurface`] because
/// trails accumulate across draw cycles instead of being cleared with the
/// rest of the frame.
pub trait PenTrail {
    fn pen_stroke(&mut self, from: Point, to: Point, color: Color, size: f64);
}

// ── NullSurface ───────────────────────────────────────────────────────────────

/// Discards everything.  The headless backend.
#[derive(Default)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn clear(&mut self) {}
    fn draw_pixel_grid(&mut self, _colors: &[Color]) {}
    fn draw_shape(&mut self, _: Shape, _: Point, _: f64, _: f64, _: Color) {}
    fn draw_line(&mut self, _: Point, _: Point, _: Color, _: f64) {}
    fn draw_text(&mut self, _: &str, _: Point, _: Color) {}
}

impl PenTrail for NullSurface {
    fn pen_stroke(&mut self, _: Point, _: Point, _: Color, _: f64) {}
}
