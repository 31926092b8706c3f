//! Axis-aligned rectangles used as removal regions and image areas
//! Created: 2026-10-14 11:31:52 UTC

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{bounding_box, Matrix, Point, Quad, EPSILON};
use crate::error::GeometryError;

/// Rectangle given by its lower-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Builds a rectangle from two opposite corners in any order
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn bottom(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        let finite = [self.x, self.y, self.width, self.height].iter().all(|v| v.is_finite());
        if !finite {
            return Err(GeometryError::InvalidRectangle(format!("{:?} has non-finite components", self)));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(GeometryError::InvalidRectangle(format!("{:?} has negative size", self)));
        }
        Ok(())
    }

    /// Corners as lower-left, upper-left, upper-right, lower-right
    pub fn vertices(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.bottom()),
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    pub fn to_quad(&self) -> Quad {
        Quad::new(self.vertices())
    }

    /// Overlap of two rectangles, `None` unless it has positive area
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let x1 = self.left().max(other.left());
        let y1 = self.bottom().max(other.bottom());
        let x2 = self.right().min(other.right());
        let y2 = self.top().min(other.top());
        (x2 - x1 > 0.0 && y2 - y1 > 0.0).then(|| Rectangle::new(x1, y1, x2 - x1, y2 - y1))
    }

    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.intersection(other).is_some()
    }

    /// Component-wise equality within the default tolerance
    pub fn equals_with_epsilon(&self, other: &Rectangle) -> bool {
        self.approx_eq(other, EPSILON)
    }

    pub fn approx_eq(&self, other: &Rectangle, eps: f64) -> bool {
        (self.x - other.x).abs() < eps
            && (self.y - other.y).abs() < eps
            && (self.width - other.width).abs() < eps
            && (self.height - other.height).abs() < eps
    }

    /// Bounding box of this rectangle after mapping its corners through `ctm`
    /// (or its inverse)
    pub fn transform(&self, ctm: &Matrix, inverse: bool) -> Result<Rectangle, GeometryError> {
        let points = ctm.transform_points(inverse, &self.vertices())?;
        bounding_box(&points).ok_or_else(|| GeometryError::InvalidRectangle("no vertices".into()))
    }
}

/// Bit-exact equality so rectangles can key memoisation tables
impl Eq for Rectangle {}

impl Hash for Rectangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in [self.x, self.y, self.width, self.height] {
            v.to_bits().hash(state);
        }
    }
}
