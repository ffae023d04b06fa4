//! `RecordingSurface` — a surface that remembers every call, in order.

use abm_core::{Color, Point, Shape};

use crate::{DrawSurface, PenTrail};

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawOp {
    Clear,
    PixelGrid { colors: Vec<Color> },
    Shape { shape: Shape, position: Point, size: f64, heading: f64, color: Color },
    Line { from: Point, to: Point, color: Color, thickness: f64 },
    Text { text: String, position: Point, color: Color },
    PenStroke { from: Point, to: Point, color: Color, size: f64 },
}

/// Records calls instead of drawing.  Tests assert on [`ops`](Self::ops)
/// to verify z-order, collection order, and hidden-entity skipping.
#[derive(Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Count of recorded ops matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn draw_pixel_grid(&mut self, colors: &[Color]) {
        self.ops.push(DrawOp::PixelGrid { colors: colors.to_vec() });
    }

    fn draw_shape(
        &mut self,
        shape: Shape,
        position: Point,
        size: f64,
        heading: f64,
        color: Color,
    ) {
        self.ops.push(DrawOp::Shape { shape, position, size, heading, color });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, thickness: f64) {
        self.ops.push(DrawOp::Line { from, to, color, thickness });
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Color) {
        self.ops.push(DrawOp::Text { text: text.to_string(), position, color });
    }
}

impl PenTrail for RecordingSurface {
    fn pen_stroke(&mut self, from: Point, to: Point, color: Color, size: f64) {
        self.ops.push(DrawOp::PenStroke { from, to, color, size });
    }
}
