//! Stroke style and the cap shapes the offsetting engine cannot produce
//! Created: 2026-10-16
//!
//! A stroked path is outlined by offsetting its polylines. Subpaths that
//! collapse onto a single point give the engine nothing to grow, so their
//! caps are rebuilt here: circles for round caps and rotated squares for
//! projecting caps on dashed strokes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DashPattern, Path, Segment, Subpath};
use crate::geometry::{point_on_segment, Point};

/// Control point offset ratio for a quarter circle drawn with one cubic
pub const CIRCLE_APPROXIMATION: f64 = 0.55191502449;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    ProjectingSquare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Graphics state parameters that shape a stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// Full width of the stroke in path space
    pub line_width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    pub dash: DashPattern,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 10.0,
            dash: DashPattern::solid(),
        }
    }
}

/// A stroked path split the way the offsetting engine wants it
#[derive(Debug, Default)]
pub struct StrokeParts {
    pub open: Vec<Vec<Point>>,
    pub closed: Vec<Vec<Point>>,
    /// Points of subpaths that draw nothing but a cap
    pub degenerate: Vec<Point>,
}

impl StrokeParts {
    pub fn from_path(path: &Path, tolerance: f64) -> Self {
        let mut parts = Self::default();
        for subpath in path.subpaths() {
            if subpath.is_degenerate() {
                parts.degenerate.push(subpath.start);
            } else if subpath.is_single_point() {
                continue;
            } else if subpath.closed {
                parts.closed.push(subpath.linear_approximation(tolerance));
            } else {
                parts.open.push(subpath.linear_approximation(tolerance));
            }
        }
        parts
    }
}

impl StrokeStyle {
    /// Cap outlines for the degenerate points of a stroke.
    ///
    /// `original` is the path before dashing; projecting squares take their
    /// direction from it, located on it within `eps`. Butt caps paint
    /// nothing on a point.
    pub fn cap_subpaths(&self, original: &Path, degenerate: &[Point], tolerance: f64, eps: f64) -> Vec<Subpath> {
        if degenerate.is_empty() {
            return Vec::new();
        }
        let half = self.line_width / 2.0;
        match self.cap {
            LineCap::Round => degenerate.iter().map(|p| approximate_circle(*p, half)).collect(),
            LineCap::ProjectingSquare if !self.dash.is_solid() => squares_along(original, degenerate, half, tolerance, eps),
            _ => Vec::new(),
        }
    }
}

/// Circle of `radius` around `center` as four cubic arcs, clockwise from the top
pub fn approximate_circle(center: Point, radius: f64) -> Subpath {
    let k = radius * CIRCLE_APPROXIMATION;
    let Point { x, y } = center;

    let mut circle = Subpath::new(Point::new(x, y + radius));
    circle.segments = vec![
        Segment::Cubic {
            ctrl1: Point::new(x + k, y + radius),
            ctrl2: Point::new(x + radius, y + k),
            to: Point::new(x + radius, y),
        },
        Segment::Cubic {
            ctrl1: Point::new(x + radius, y - k),
            ctrl2: Point::new(x + k, y - radius),
            to: Point::new(x, y - radius),
        },
        Segment::Cubic {
            ctrl1: Point::new(x - k, y - radius),
            ctrl2: Point::new(x - radius, y - k),
            to: Point::new(x - radius, y),
        },
        Segment::Cubic {
            ctrl1: Point::new(x - radius, y + k),
            ctrl2: Point::new(x - k, y + radius),
            to: Point::new(x, y + radius),
        },
    ];
    circle.closed = true;
    circle
}

/// Square of side `2 * half` centered on `center`, rotated by `angle`
fn rotated_square(center: Point, half: f64, angle: f64) -> Subpath {
    let (sin, cos) = angle.sin_cos();
    let along = Point::new(half * cos, half * sin);
    let across = Point::new(-half * sin, half * cos);
    let corner = |u: f64, v: f64| Point::new(center.x + u * along.x + v * across.x, center.y + u * along.y + v * across.y);

    let mut square = Subpath::new(corner(-1.0, -1.0));
    square.segments = vec![
        Segment::Line { to: corner(1.0, -1.0) },
        Segment::Line { to: corner(1.0, 1.0) },
        Segment::Line { to: corner(-1.0, 1.0) },
    ];
    square.closed = true;
    square
}

/// Projecting caps for dash points, oriented along the original path.
///
/// Dash points appear in path order, so the walk over the approximation
/// only moves forward. A point that lies on no remaining segment ends the
/// walk; the squares found so far are kept.
fn squares_along(original: &Path, points: &[Point], half: f64, tolerance: f64, eps: f64) -> Vec<Subpath> {
    let edges: Vec<(Point, Point)> = original
        .subpaths()
        .iter()
        .flat_map(|s| {
            let approx = s.linear_approximation(tolerance);
            approx.windows(2).map(|w| (w[0], w[1])).collect::<Vec<_>>()
        })
        .filter(|(a, b)| a != b)
        .collect();

    if edges.is_empty() {
        debug!("path approximation has fewer than two points, no square caps");
        return Vec::new();
    }

    let mut squares = Vec::with_capacity(points.len());
    let mut index = 0;
    for point in points {
        while index < edges.len() && !point_on_segment(point, &edges[index].0, &edges[index].1, true, eps) {
            index += 1;
        }
        let Some((a, b)) = edges.get(index) else {
            debug!("dash point ({}, {}) is off the path, {} square caps built", point.x, point.y, squares.len());
            break;
        };

        let angle = if a.x == b.x { std::f64::consts::FRAC_PI_2 } else { ((b.y - a.y) / (b.x - a.x)).atan() };
        squares.push(rotated_square(*point, half, angle));
    }
    squares
}
