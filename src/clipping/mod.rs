//! Bridge to the polygon clipping engine
//!
//! Geometry crosses into `geo-clipper` as `geo` polygons and line strings;
//! the engine works on integer coordinates, so every call carries the
//! float-to-integer `scale` from the sweep configuration.

pub mod bridge;
pub mod offset;

pub use bridge::ClipperBridge;

use serde::{Deserialize, Serialize};

/// Interior rule for self-intersecting or nested outlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}
