//! Shape classification of quadrilateral footprints
//! Created: 2026-10-15
//!
//! Classification runs on the integer coordinates the clipping engine would
//! see, so a quad the engine treats as flat is flat here too.

use crate::clipping::ClipperBridge;
use crate::geometry::Point;

/// What a four-point footprint actually covers
#[derive(Debug, Clone, PartialEq)]
pub enum Footprint {
    /// At least three distinct, non-collinear points
    Area(Vec<Point>),
    /// Collinear points spanning more than the tolerance
    Segment(Point, Point),
    /// Everything within the tolerance of one point
    Point(Point),
}

impl Footprint {
    pub fn classify(points: &[Point], bridge: &ClipperBridge, eps: f64) -> Footprint {
        let Some(first) = points.first() else {
            return Footprint::Point(Point::default());
        };

        let mut distinct: Vec<(i64, i64)> = Vec::with_capacity(points.len());
        for p in points {
            let engine = bridge.to_engine(p);
            if !distinct.contains(&engine) {
                distinct.push(engine);
            }
        }

        if distinct.len() >= 3 && !all_collinear(&distinct) {
            return Footprint::Area(points.to_vec());
        }

        // the segment runs from the first vertex to the first one clearly apart from it
        match points.iter().find(|p| p.distance(first) > eps) {
            Some(far) => Footprint::Segment(*first, *far),
            None => Footprint::Point(*first),
        }
    }

    pub fn is_area(&self) -> bool {
        matches!(self, Footprint::Area(_))
    }
}

fn all_collinear(points: &[(i64, i64)]) -> bool {
    let (x0, y0) = (points[0].0 as i128, points[0].1 as i128);
    let (dx, dy) = (points[1].0 as i128 - x0, points[1].1 as i128 - y0);
    points[2..].iter().all(|(x, y)| {
        let (ex, ey) = (*x as i128 - x0, *y as i128 - y0);
        dx * ey - dy * ex == 0
    })
}
