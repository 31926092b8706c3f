//! Stroke offsetting: open and closed polylines grown into filled outlines
//! Created: 2026-10-15
//!
//! Every stroke is assembled from closed pieces (one body per edge, one
//! piece per join, one per cap) that are then merged with a non-zero
//! union. Pieces are wound counter-clockwise so overlaps never cancel.

use std::f64::consts::PI;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use geo_clipper::Clipper;
use tracing::{error, trace};

use super::ClipperBridge;
use crate::geometry::Point;
use crate::path::{LineCap, LineJoin, StrokeStyle};

const MIN_ARC_STEPS: usize = 8;
const MAX_ARC_STEPS: usize = 1024;

impl ClipperBridge {
    /// Grows each polyline by half the line width on both sides.
    ///
    /// Closed polylines get joins at every vertex and no caps; open ones
    /// end with the shape the style's cap asks for. Round joins and caps
    /// stay within `arc_tolerance` user units of the true arc.
    pub fn offset_polylines(
        &self,
        open: &[Vec<Point>],
        closed: &[Vec<Point>],
        style: &StrokeStyle,
        arc_tolerance: f64,
    ) -> MultiPolygon<f64> {
        let half = style.line_width / 2.0;
        if !(half > 0.0 && half.is_finite()) {
            return MultiPolygon::new(vec![]);
        }

        let outliner = Outliner {
            half,
            join: style.join,
            miter_limit: style.miter_limit,
            cap: style.cap,
            arc_steps: arc_steps(half, arc_tolerance),
        };

        let mut pieces = Vec::new();
        for line in open {
            outliner.open_polyline(&dedup(line, false), &mut pieces);
        }
        for ring in closed {
            outliner.closed_polyline(&dedup(ring, true), &mut pieces);
        }

        let count = pieces.len();
        pieces.retain(|piece: &Vec<Point>| {
            let fits = self.fits(piece);
            if !fits {
                error!("Dropping stroke piece outside the clipping engine's range");
            }
            fits
        });
        if pieces.is_empty() {
            return MultiPolygon::new(vec![]);
        }

        let pieces = MultiPolygon::new(pieces.iter().map(|p| counter_clockwise(p)).collect());
        let outline = Clipper::union(&pieces, &MultiPolygon::new(vec![]), self.scale());
        trace!("stroke of {} pieces merged into {} polygons", count, outline.0.len());
        outline
    }
}

/// Number of vertices approximating a full circle of `radius` within `tolerance`
pub fn arc_steps(radius: f64, tolerance: f64) -> usize {
    if !(tolerance > 0.0) || tolerance >= radius {
        return MIN_ARC_STEPS;
    }
    let steps = (PI / (1.0 - tolerance / radius).acos()).ceil();
    (steps as usize).clamp(MIN_ARC_STEPS, MAX_ARC_STEPS)
}

struct Outliner {
    half: f64,
    join: LineJoin,
    miter_limit: f64,
    cap: LineCap,
    arc_steps: usize,
}

impl Outliner {
    fn open_polyline(&self, points: &[Point], pieces: &mut Vec<Vec<Point>>) {
        if points.len() < 2 {
            return;
        }
        for edge in points.windows(2) {
            pieces.push(self.body(edge[0], edge[1]));
        }
        for window in points.windows(3) {
            self.join_piece(window[0], window[1], window[2], pieces);
        }

        let last = points.len() - 1;
        self.cap_piece(points[0], direction(points[1], points[0]), pieces);
        self.cap_piece(points[last], direction(points[last - 1], points[last]), pieces);
    }

    fn closed_polyline(&self, points: &[Point], pieces: &mut Vec<Vec<Point>>) {
        let n = points.len();
        if n < 2 {
            return;
        }
        for i in 0..n {
            let (previous, current, next) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
            pieces.push(self.body(current, next));
            self.join_piece(previous, current, next, pieces);
        }
    }

    /// Rectangle covering the edge `a -> b`
    fn body(&self, a: Point, b: Point) -> Vec<Point> {
        let (dx, dy) = direction(a, b);
        let (nx, ny) = (-dy * self.half, dx * self.half);
        vec![
            Point::new(a.x + nx, a.y + ny),
            Point::new(a.x - nx, a.y - ny),
            Point::new(b.x - nx, b.y - ny),
            Point::new(b.x + nx, b.y + ny),
        ]
    }

    /// Fills the outer wedge where edge `a -> v` turns into `v -> b`
    fn join_piece(&self, a: Point, v: Point, b: Point, pieces: &mut Vec<Vec<Point>>) {
        let d1 = direction(a, v);
        let d2 = direction(v, b);
        let cross = d1.0 * d2.1 - d1.1 * d2.0;
        let dot = d1.0 * d2.0 + d1.1 * d2.1;

        if cross.abs() < 1e-12 && dot > 0.0 {
            return;
        }
        if self.join == LineJoin::Round {
            pieces.push(circle(v, self.half, self.arc_steps));
            return;
        }
        if cross.abs() < 1e-12 {
            // full reversal: the bevel has no area and a miter is unbounded
            return;
        }

        // the outer side of a left turn is on the right of both edges
        let side = if cross > 0.0 { -1.0 } else { 1.0 };
        let n1 = (-d1.1 * side * self.half, d1.0 * side * self.half);
        let n2 = (-d2.1 * side * self.half, d2.0 * side * self.half);
        let p1 = Point::new(v.x + n1.0, v.y + n1.1);
        let p2 = Point::new(v.x + n2.0, v.y + n2.1);

        // miter length over line width is 1 / sin(phi / 2), phi the angle between the edges
        let ratio = 1.0 / ((1.0 + dot) / 2.0).sqrt();
        if self.join == LineJoin::Miter && ratio <= self.miter_limit {
            let (bx, by) = (n1.0 + n2.0, n1.1 + n2.1);
            let length = bx.hypot(by);
            let reach = self.half * ratio / length;
            let tip = Point::new(v.x + bx * reach, v.y + by * reach);
            pieces.push(vec![v, p1, tip, p2]);
        } else {
            pieces.push(vec![v, p1, p2]);
        }
    }

    /// Cap at `end`, `(dx, dy)` pointing out of the stroke
    fn cap_piece(&self, end: Point, (dx, dy): (f64, f64), pieces: &mut Vec<Vec<Point>>) {
        match self.cap {
            LineCap::Butt => {}
            LineCap::Round => pieces.push(circle(end, self.half, self.arc_steps)),
            LineCap::ProjectingSquare => {
                let (nx, ny) = (-dy * self.half, dx * self.half);
                let (ox, oy) = (dx * self.half, dy * self.half);
                pieces.push(vec![
                    Point::new(end.x + nx, end.y + ny),
                    Point::new(end.x - nx, end.y - ny),
                    Point::new(end.x - nx + ox, end.y - ny + oy),
                    Point::new(end.x + nx + ox, end.y + ny + oy),
                ]);
            }
        }
    }
}

/// Unit vector from `a` to `b`; callers pass distinct points
fn direction(a: Point, b: Point) -> (f64, f64) {
    let length = a.distance(&b);
    ((b.x - a.x) / length, (b.y - a.y) / length)
}

/// Drops repeated consecutive points, and for rings a closing repeat of the start
fn dedup(points: &[Point], ring: bool) -> Vec<Point> {
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if unique.last() != Some(p) {
            unique.push(*p);
        }
    }
    if ring && unique.len() > 1 && unique.first() == unique.last() {
        unique.pop();
    }
    unique
}

fn circle(center: Point, radius: f64, steps: usize) -> Vec<Point> {
    (0..steps)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / steps as f64;
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
        .collect()
}

fn counter_clockwise(points: &[Point]) -> Polygon<f64> {
    let twice_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();

    let mut coords: Vec<Coord<f64>> = points.iter().map(|p| Coord::from(*p)).collect();
    if twice_area < 0.0 {
        coords.reverse();
    }
    Polygon::new(LineString::from(coords), vec![])
}
