//! Tests for the stock surfaces.

#[cfg(test)]
mod recording {
    use abm_core::{Color, Point, Shape};

    use crate::record::{DrawOp, RecordingSurface};
    use crate::{DrawSurface, PenTrail};

    #[test]
    fn preserves_call_order() {
        let mut surface = RecordingSurface::new();
        surface.clear();
        surface.draw_pixel_grid(&[Color::BLACK]);
        surface.draw_shape(Shape::Circle, Point::ORIGIN, 1.0, 0.0, Color::RED);
        surface.draw_text("hi", Point::ORIGIN, Color::WHITE);

        let ops = surface.ops();
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0], DrawOp::Clear);
        assert!(matches!(ops[1], DrawOp::PixelGrid { .. }));
        assert!(matches!(ops[2], DrawOp::Shape { shape: Shape::Circle, .. }));
        assert!(matches!(ops[3], DrawOp::Text { .. }));
    }

    #[test]
    fn take_ops_drains() {
        let mut surface = RecordingSurface::new();
        surface.pen_stroke(Point::ORIGIN, Point::new(1.0, 0.0), Color::RED, 1.0);
        assert_eq!(surface.take_ops().len(), 1);
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn count_filters_by_kind() {
        let mut surface = RecordingSurface::new();
        surface.draw_line(Point::ORIGIN, Point::new(1.0, 1.0), Color::RED, 1.0);
        surface.draw_line(Point::ORIGIN, Point::new(2.0, 2.0), Color::RED, 1.0);
        surface.clear();
        assert_eq!(surface.count(|op| matches!(op, DrawOp::Line { .. })), 2);
    }
}
