//! Page-space geometry shared by every redaction filter
//!
//! Affine transforms, axis-aligned rectangles, quadrilateral footprints and
//! the tolerance-aware point/segment predicates the filters build on.

pub mod matrix;
pub mod quad;
pub mod rectangle;

pub use matrix::Matrix;
pub use quad::Quad;
pub use rectangle::Rectangle;

use serde::{Deserialize, Serialize};

/// Default tolerance for geometric comparisons in user space units
pub const EPSILON: f64 = 1e-4;

/// A point in some user space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Component-wise comparison within `eps`
    pub fn approx_eq(&self, other: &Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    pub(crate) fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::Coord { x: p.x, y: p.y }
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(c: geo::Coord<f64>) -> Self {
        Point::new(c.x, c.y)
    }
}

/// Checks whether `point` lies on the line through `start` and `end`.
///
/// Collinearity is a cross-product test against `eps`. With `within_segment`
/// the point must also fall between the endpoints, compared on the dominant
/// axis of the segment so that near-vertical and near-horizontal segments
/// are both handled with the same tolerance.
pub fn point_on_segment(point: &Point, start: &Point, end: &Point, within_segment: bool, eps: f64) -> bool {
    let dxc = point.x - start.x;
    let dyc = point.y - start.y;
    let dxl = end.x - start.x;
    let dyl = end.y - start.y;
    let cross = dxc * dyl - dyc * dxl;

    if cross.abs() > eps {
        return false;
    }
    if !within_segment {
        return true;
    }

    if dxl.abs() >= dyl.abs() {
        if dxl > 0.0 {
            start.x - eps <= point.x && point.x <= end.x + eps
        } else {
            end.x - eps <= point.x && point.x <= start.x + eps
        }
    } else if dyl > 0.0 {
        start.y - eps <= point.y && point.y <= end.y + eps
    } else {
        end.y - eps <= point.y && point.y <= start.y + eps
    }
}

/// Axis-aligned bounding box of a point set, `None` when empty
pub fn bounding_box(points: &[Point]) -> Option<Rectangle> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Rectangle::new(min_x, min_y, max_x - min_x, max_y - min_y))
}
