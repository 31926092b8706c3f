//! Conversions between redaction geometry and `geo` types, plus the
//! boolean operations the filters need
//! Created: 2026-10-15 08:20:14 UTC

use geo::{Coord, LineString, MultiLineString, MultiPolygon, Polygon};
use geo_clipper::{Clipper, ClipperOpen};
use tracing::{error, trace};

use super::FillRule;
use crate::geometry::Point;
use crate::path::{Path, Segment, Subpath};

/// Largest coordinate magnitude the engine accepts after scaling
pub const ENGINE_RANGE: f64 = 4.6e18;

/// Scaled access to the clipping engine
#[derive(Debug, Clone, Copy)]
pub struct ClipperBridge {
    scale: f64,
    curve_tolerance: f64,
}

impl ClipperBridge {
    pub fn new(scale: f64, curve_tolerance: f64) -> Self {
        Self { scale, curve_tolerance }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn curve_tolerance(&self) -> f64 {
        self.curve_tolerance
    }

    /// Integer coordinates the engine will see for `point`
    pub fn to_engine(&self, point: &Point) -> (i64, i64) {
        ((point.x * self.scale).round() as i64, (point.y * self.scale).round() as i64)
    }

    /// Every point is finite and lands inside the engine's integer range once scaled
    pub fn fits(&self, points: &[Point]) -> bool {
        points
            .iter()
            .all(|p| (p.x * self.scale).abs() <= ENGINE_RANGE && (p.y * self.scale).abs() <= ENGINE_RANGE)
    }

    /// Closed ring without holes; the engine closes it implicitly
    pub fn ring(points: &[Point]) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = points.iter().map(|p| Coord::from(*p)).collect();
        Polygon::new(LineString::from(coords), vec![])
    }

    pub fn polyline(points: &[Point]) -> LineString<f64> {
        LineString::from(points.iter().map(|p| Coord::from(*p)).collect::<Vec<_>>())
    }

    /// Clip-engine subject for a path whose subpaths are all closed.
    ///
    /// Non-zero subjects keep every ring with its own orientation so that
    /// counter-wound holes survive. Even-odd subjects are folded ring by ring
    /// with exclusive-or, which reproduces even-odd interiors for rings that
    /// do not cross themselves. Rings the engine cannot represent are
    /// dropped and logged.
    pub fn subject_from_path(&self, path: &Path, fill_rule: FillRule) -> MultiPolygon<f64> {
        let rings: Vec<Polygon<f64>> = path
            .subpaths()
            .iter()
            .map(|s| s.linear_approximation(self.curve_tolerance))
            .filter(|points| points.len() >= 3)
            .filter(|points| {
                let fits = self.fits(points);
                if !fits {
                    error!("Dropping subpath outside the clipping engine's range");
                }
                fits
            })
            .map(|points| Self::ring(&points))
            .collect();

        match fill_rule {
            FillRule::NonZero => MultiPolygon::new(rings),
            FillRule::EvenOdd => rings
                .into_iter()
                .fold(MultiPolygon::new(vec![]), |acc, ring| Clipper::xor(&acc, &ring, self.scale)),
        }
    }

    /// `subject` minus the non-zero union of `clips`
    pub fn difference(&self, subject: &MultiPolygon<f64>, clips: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        let result = Clipper::difference(subject, clips, self.scale);
        trace!("difference: {} subject polygons -> {}", subject.0.len(), result.0.len());
        result
    }

    /// Area intersection of two closed outlines is non-empty.
    ///
    /// Outlines beyond the engine's range count as intersecting.
    pub fn areas_intersect(&self, subject: &[Point], clip: &[Point]) -> bool {
        if !self.fits(subject) || !self.fits(clip) {
            error!("Intersection test outside the clipping engine's range, treating as covered");
            return true;
        }
        let result = Clipper::intersection(&Self::ring(subject), &Self::ring(clip), self.scale);
        !result.0.is_empty()
    }

    /// Part of the open polyline `subject` lies inside the closed outline `clip`
    pub fn polyline_intersects(&self, subject: &[Point], clip: &[Point]) -> bool {
        if !self.fits(subject) || !self.fits(clip) {
            error!("Intersection test outside the clipping engine's range, treating as covered");
            return true;
        }
        let lines = MultiLineString::new(vec![Self::polyline(subject)]);
        let result: MultiLineString<f64> = ClipperOpen::intersection(&lines, &Self::ring(clip), self.scale);
        result.0.iter().any(|line| line.0.len() >= 2)
    }

    /// Every ring of the engine's output becomes a closed straight-edged subpath
    pub fn to_path(polygons: &MultiPolygon<f64>) -> Path {
        let mut path = Path::new();
        for polygon in &polygons.0 {
            for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                if let Some(subpath) = Self::ring_to_subpath(ring) {
                    path.add_subpath(subpath);
                }
            }
        }
        path
    }

    fn ring_to_subpath(ring: &LineString<f64>) -> Option<Subpath> {
        let mut coords: Vec<Point> = ring.0.iter().map(|c| Point::from(*c)).collect();
        if coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }
        let (first, rest) = coords.split_first()?;
        let mut subpath = Subpath::new(*first);
        subpath.segments = rest.iter().map(|p| Segment::Line { to: *p }).collect();
        subpath.closed = true;
        Some(subpath)
    }
}
