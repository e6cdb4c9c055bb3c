//! Outline pen: records rusttype outline callbacks as path commands

use glyphkit_core::{GlyphPath, PathCommand, Point};
use rusttype::OutlineBuilder;

/// Collects the outline of one glyph as a sequence of draw commands.
///
/// Quadratic segments are promoted to exact cubics by degree elevation
/// (`c1 = p0 + 2/3 (q - p0)`, `c2 = p1 + 2/3 (q - p1)`), so the
/// recorded path only ever contains the four closed command kinds.
#[derive(Debug, Default)]
pub struct OutlinePen {
    path: GlyphPath,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl OutlinePen {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded path. Empty when the glyph drew nothing.
    pub fn into_path(self) -> GlyphPath {
        self.path
    }
}

impl OutlineBuilder for OutlinePen {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = Point::new(x as f64, y as f64);
        self.path.push(PathCommand::MoveTo(p));
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = Point::new(x as f64, y as f64);
        self.path.push(PathCommand::LineTo(p));
        self.current = Some(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let ctrl = Point::new(x1 as f64, y1 as f64);
        let end = Point::new(x as f64, y as f64);
        // Degree elevation needs the segment start; a quad with no
        // preceding point degenerates to its own control.
        let start = self.current.unwrap_or(ctrl);
        let c1 = Point::new(
            start.x + 2.0 / 3.0 * (ctrl.x - start.x),
            start.y + 2.0 / 3.0 * (ctrl.y - start.y),
        );
        let c2 = Point::new(
            end.x + 2.0 / 3.0 * (ctrl.x - end.x),
            end.y + 2.0 / 3.0 * (ctrl.y - end.y),
        );
        self.path.push(PathCommand::CurveTo(c1, c2, end));
        self.current = Some(end);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let end = Point::new(x as f64, y as f64);
        self.path.push(PathCommand::CurveTo(
            Point::new(x1 as f64, y1 as f64),
            Point::new(x2 as f64, y2 as f64),
            end,
        ));
        self.current = Some(end);
    }

    fn close(&mut self) {
        self.path.push(PathCommand::Close);
        self.current = self.subpath_start;
    }
}
