//! Quadrilateral footprints: rectangles seen through an affine transform
//! Created: 2026-10-14

use super::{bounding_box, Matrix, Point, Rectangle};

/// Four ordered points, possibly collapsed onto a line or a single point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    points: [Point; 4],
}

impl Quad {
    pub const fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Footprint of a glyph or run: ascent start, ascent end, descent end, descent start
    pub fn from_lines(ascent: (Point, Point), descent: (Point, Point)) -> Self {
        Self::new([ascent.0, ascent.1, descent.1, descent.0])
    }

    /// The unit square `[0,1]x[0,1]` mapped through `ctm`
    pub fn unit_square(ctm: &Matrix) -> Self {
        Self::new([
            ctm.transform_point(&Point::new(0.0, 0.0)),
            ctm.transform_point(&Point::new(0.0, 1.0)),
            ctm.transform_point(&Point::new(1.0, 1.0)),
            ctm.transform_point(&Point::new(1.0, 0.0)),
        ])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn transform(&self, ctm: &Matrix) -> Quad {
        Quad::new(self.points.map(|p| ctm.transform_point(&p)))
    }

    pub fn bounding_box(&self) -> Rectangle {
        // four points, never empty
        bounding_box(&self.points).unwrap_or_default()
    }
}

impl From<Rectangle> for Quad {
    fn from(rect: Rectangle) -> Self {
        rect.to_quad()
    }
}
