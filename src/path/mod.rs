//! Vector path model for line art redaction
//!
//! A path is an ordered list of subpaths, each starting at a point and
//! continuing through straight and cubic Bezier segments. Paths are built
//! explicitly by the caller that owns them; the filters produce new paths
//! rather than editing their inputs.

pub mod dash;
pub mod flatten;
pub mod stroke;

pub use dash::DashPattern;
pub use stroke::{LineCap, LineJoin, StrokeParts, StrokeStyle};

use crate::geometry::{bounding_box, Matrix, Point, Rectangle};

/// One drawing segment continuing from the previous end point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line { to: Point },
    Cubic { ctrl1: Point, ctrl2: Point, to: Point },
}

impl Segment {
    pub fn end(&self) -> Point {
        match self {
            Segment::Line { to } | Segment::Cubic { to, .. } => *to,
        }
    }

    fn transform(&self, ctm: &Matrix) -> Segment {
        match self {
            Segment::Line { to } => Segment::Line { to: ctm.transform_point(to) },
            Segment::Cubic { ctrl1, ctrl2, to } => Segment::Cubic {
                ctrl1: ctm.transform_point(ctrl1),
                ctrl2: ctm.transform_point(ctrl2),
                to: ctm.transform_point(to),
            },
        }
    }
}

/// A connected run of segments
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub start: Point,
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Subpath {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    pub fn end(&self) -> Point {
        self.segments.last().map(Segment::end).unwrap_or(self.start)
    }

    /// True for a subpath that paints nothing but its cap: it is open (or
    /// closed without segments) and every segment collapses onto the start
    pub fn is_degenerate(&self) -> bool {
        if !self.segments.is_empty() && self.closed {
            return false;
        }
        let mut previous = self.start;
        for segment in &self.segments {
            let collapsed = match segment {
                Segment::Line { to } => *to == previous,
                Segment::Cubic { ctrl1, ctrl2, to } => *ctrl1 == previous && *ctrl2 == previous && *to == previous,
            };
            if !collapsed {
                return false;
            }
            previous = segment.end();
        }
        !self.segments.is_empty() || self.closed
    }

    /// A bare `move_to` with nothing drawn from it
    pub fn is_single_point(&self) -> bool {
        self.segments.is_empty()
    }

    /// Polyline through the subpath with curves subdivided to `tolerance`;
    /// closed subpaths repeat the start point at the end
    pub fn linear_approximation(&self, tolerance: f64) -> Vec<Point> {
        let mut points = vec![self.start];
        let mut current = self.start;
        for segment in &self.segments {
            match segment {
                Segment::Line { to } => points.push(*to),
                Segment::Cubic { ctrl1, ctrl2, to } => {
                    flatten::flatten_cubic(current, *ctrl1, *ctrl2, *to, tolerance, &mut points);
                }
            }
            current = segment.end();
        }
        if self.closed && current != self.start {
            points.push(self.start);
        }
        points
    }

    fn transform(&self, ctm: &Matrix) -> Subpath {
        Subpath {
            start: ctm.transform_point(&self.start),
            segments: self.segments.iter().map(|s| s.transform(ctm)).collect(),
            closed: self.closed,
        }
    }
}

/// An ordered sequence of subpaths
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    subpaths: Vec<Subpath>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_subpaths(subpaths: Vec<Subpath>) -> Self {
        Self { subpaths }
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn into_subpaths(self) -> Vec<Subpath> {
        self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.subpaths.push(Subpath::new(Point::new(x, y)));
        self
    }

    /// Appends a line; starts a subpath at the origin if none is open
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.current_subpath().segments.push(Segment::Line { to: Point::new(x, y) });
        self
    }

    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> &mut Self {
        self.current_subpath().segments.push(Segment::Cubic {
            ctrl1: Point::new(x1, y1),
            ctrl2: Point::new(x2, y2),
            to: Point::new(x3, y3),
        });
        self
    }

    pub fn close_subpath(&mut self) -> &mut Self {
        if let Some(last) = self.subpaths.last_mut() {
            last.closed = true;
        }
        self
    }

    /// `re` operator: a closed rectangle subpath
    pub fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.move_to(x, y)
            .line_to(x + width, y)
            .line_to(x + width, y + height)
            .line_to(x, y + height)
            .close_subpath()
    }

    pub fn add_subpath(&mut self, subpath: Subpath) {
        self.subpaths.push(subpath);
    }

    pub fn add_subpaths(&mut self, subpaths: impl IntoIterator<Item = Subpath>) {
        self.subpaths.extend(subpaths);
    }

    /// Closes every subpath that draws something; bare move-to subpaths are dropped
    pub fn close_all_subpaths(&mut self) {
        self.subpaths.retain(|s| !s.segments.is_empty());
        for subpath in &mut self.subpaths {
            subpath.closed = true;
        }
    }

    pub fn transform(&self, ctm: &Matrix) -> Path {
        Path::from_subpaths(self.subpaths.iter().map(|s| s.transform(ctm)).collect())
    }

    /// Bounds of every start, control and end point
    pub fn bounding_box(&self) -> Option<Rectangle> {
        let mut points = Vec::new();
        for subpath in &self.subpaths {
            points.push(subpath.start);
            for segment in &subpath.segments {
                match segment {
                    Segment::Line { to } => points.push(*to),
                    Segment::Cubic { ctrl1, ctrl2, to } => points.extend([*ctrl1, *ctrl2, *to]),
                }
            }
        }
        bounding_box(&points)
    }

    fn current_subpath(&mut self) -> &mut Subpath {
        let needs_new = self.subpaths.last().map_or(true, |s| s.closed);
        if needs_new {
            // drawing continues from the start point of a closed subpath
            let start = self.subpaths.last().map(|s| s.start).unwrap_or_default();
            self.subpaths.push(Subpath::new(start));
        }
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }
}
