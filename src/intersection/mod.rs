//! Degenerate-tolerant intersection of content footprints with regions
//! Created: 2026-10-15 13:02:45 UTC
//!
//! The first quad is always the content (subject) and the second the
//! removal region (clip). The roles are not interchangeable: a flat region
//! never removes content that covers area, while flat content can still be
//! removed by a region it lies in or on.

pub mod footprint;

pub use footprint::Footprint;

use tracing::trace;

use crate::clipping::ClipperBridge;
use crate::geometry::{point_on_segment, Quad};

/// True when the content footprint and the region footprint overlap
pub fn quads_intersect(content: &Quad, region: &Quad, bridge: &ClipperBridge, eps: f64) -> bool {
    let subject = Footprint::classify(content.points(), bridge, eps);
    let clip = Footprint::classify(region.points(), bridge, eps);

    let result = match (&subject, &clip) {
        (Footprint::Area(s), Footprint::Area(c)) => bridge.areas_intersect(s, c),
        // flat content inside an area region is clipped as an open line
        (Footprint::Segment(..), Footprint::Area(c)) => bridge.polyline_intersects(content.points(), c),
        (Footprint::Point(_), Footprint::Area(_)) => false,
        (Footprint::Area(_), _) => false,
        (_, Footprint::Segment(start, end)) => content
            .points()
            .iter()
            .any(|p| point_on_segment(p, start, end, true, eps)),
        (_, Footprint::Point(_)) => false,
    };

    trace!(
        "intersect subject={:?} clip={:?} -> {}",
        discriminant_name(&subject),
        discriminant_name(&clip),
        result
    );
    result
}

/// True when `content` meets at least one of `regions`
pub fn intersects_any(content: &Quad, regions: &[Quad], bridge: &ClipperBridge, eps: f64) -> bool {
    regions.iter().any(|region| quads_intersect(content, region, bridge, eps))
}

fn discriminant_name(footprint: &Footprint) -> &'static str {
    match footprint {
        Footprint::Area(_) => "area",
        Footprint::Segment(..) => "segment",
        Footprint::Point(_) => "point",
    }
}
