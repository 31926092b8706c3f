//! Dash pattern expansion
//! Created: 2026-10-15
//!
//! Turns a stroked path into the open subpaths its "on" dashes cover. The
//! pattern restarts on every subpath. A zero-length "on" dash still yields
//! a subpath (a single zero-length line) so that its cap can be painted.

use serde::{Deserialize, Serialize};

use super::{Path, Segment, Subpath};
use crate::geometry::Point;

/// On/off lengths plus the distance into the pattern at which stroking starts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashPattern {
    pub array: Vec<f64>,
    pub phase: f64,
}

/// Position inside the repeating pattern
struct DashCursor<'a> {
    array: &'a [f64],
    index: usize,
    remaining: f64,
}

impl<'a> DashCursor<'a> {
    fn new(pattern: &'a DashPattern) -> Self {
        let array = pattern.array.as_slice();
        let mut cursor = Self {
            array,
            index: 0,
            remaining: array[0],
        };

        // odd-length arrays alternate on/off over two passes
        let passes = if array.len() % 2 == 1 { 2.0 } else { 1.0 };
        let cycle: f64 = array.iter().sum::<f64>() * passes;
        let mut phase = if pattern.phase.is_finite() { pattern.phase.rem_euclid(cycle) } else { 0.0 };

        while phase > 0.0 {
            if phase >= cursor.remaining {
                phase -= cursor.remaining;
                cursor.advance();
            } else {
                cursor.remaining -= phase;
                phase = 0.0;
            }
        }
        cursor
    }

    fn is_on(&self) -> bool {
        self.index % 2 == 0
    }

    fn advance(&mut self) {
        self.index += 1;
        self.remaining = self.array[self.index % self.array.len()];
    }
}

impl DashPattern {
    pub fn new(array: Vec<f64>, phase: f64) -> Self {
        Self { array, phase }
    }

    pub fn solid() -> Self {
        Self::default()
    }

    /// Empty, all-zero or malformed arrays stroke a solid line
    pub fn is_solid(&self) -> bool {
        self.array.is_empty()
            || self.array.iter().any(|v| !v.is_finite() || *v < 0.0)
            || self.array.iter().all(|v| *v == 0.0)
    }

    /// Splits every subpath of `path` into its visible dashes
    pub fn apply(&self, path: &Path, tolerance: f64) -> Path {
        if self.is_solid() {
            return path.clone();
        }

        let mut dashed = Path::new();
        for subpath in path.subpaths() {
            if subpath.is_single_point() {
                continue;
            }
            if subpath.is_degenerate() {
                dashed.add_subpath(subpath.clone());
                continue;
            }
            let approximation = subpath.linear_approximation(tolerance);
            dashed.add_subpaths(self.dash_polyline(&approximation));
        }
        dashed
    }

    fn dash_polyline(&self, points: &[Point]) -> Vec<Subpath> {
        let mut dashes = Vec::new();
        let Some(first) = points.first() else {
            return dashes;
        };

        let mut cursor = DashCursor::new(self);
        let mut current = cursor.is_on().then(|| Subpath::new(*first));

        for edge in points.windows(2) {
            let (a, b) = (edge[0], edge[1]);
            let length = a.distance(&b);
            if length == 0.0 {
                continue;
            }

            let mut position = 0.0;
            loop {
                let available = length - position;
                if cursor.remaining > available {
                    cursor.remaining -= available;
                    if let Some(dash) = current.as_mut() {
                        if available > 0.0 {
                            dash.segments.push(Segment::Line { to: b });
                        }
                    }
                    break;
                }

                position += cursor.remaining;
                let split = a.lerp(&b, position / length);
                if let Some(mut dash) = current.take() {
                    dash.segments.push(Segment::Line { to: split });
                    dashes.push(dash);
                }

                cursor.advance();
                if cursor.is_on() {
                    current = Some(Subpath::new(split));
                }
            }
        }

        if let Some(dash) = current {
            if !dash.segments.is_empty() {
                dashes.push(dash);
            }
        }
        dashes
    }
}
