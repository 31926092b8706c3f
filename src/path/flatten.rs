//! Piecewise-linear approximation of cubic Bezier segments
//! Created: 2026-10-15 16:44:09 UTC

use crate::geometry::Point;

/// Subdivision stops here even if the curve is still not flat
const MAX_DEPTH: u32 = 16;

/// Largest distance of the control points from the chord `p0 -> p3`
pub fn flatness(p0: Point, p1: Point, p2: Point, p3: Point) -> f64 {
    let dx = p3.x - p0.x;
    let dy = p3.y - p0.y;
    let chord = dx.hypot(dy);

    if chord <= f64::EPSILON {
        return p0.distance(&p1).max(p0.distance(&p2));
    }

    let d1 = ((p1.x - p0.x) * dy - (p1.y - p0.y) * dx).abs() / chord;
    let d2 = ((p2.x - p0.x) * dy - (p2.y - p0.y) * dx).abs() / chord;
    d1.max(d2)
}

/// Appends the approximation of the cubic to `out`, excluding `p0`
pub fn flatten_cubic(p0: Point, p1: Point, p2: Point, p3: Point, tolerance: f64, out: &mut Vec<Point>) {
    subdivide(p0, p1, p2, p3, tolerance, 0, out);
}

fn subdivide(p0: Point, p1: Point, p2: Point, p3: Point, tolerance: f64, depth: u32, out: &mut Vec<Point>) {
    if depth >= MAX_DEPTH || flatness(p0, p1, p2, p3) <= tolerance {
        out.push(p3);
        return;
    }

    // de Casteljau split at t = 0.5
    let p01 = p0.lerp(&p1, 0.5);
    let p12 = p1.lerp(&p2, 0.5);
    let p23 = p2.lerp(&p3, 0.5);
    let p012 = p01.lerp(&p12, 0.5);
    let p123 = p12.lerp(&p23, 0.5);
    let mid = p012.lerp(&p123, 0.5);

    subdivide(p0, p01, p012, mid, tolerance, depth + 1, out);
    subdivide(mid, p123, p23, p3, tolerance, depth + 1, out);
}
