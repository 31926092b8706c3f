//! Line art redaction: region removal from filled and stroked paths
//! Created: 2026-10-16 10:27:31 UTC

use geo::MultiPolygon;
use tracing::{debug, error, instrument};

use super::RegionFilter;
use crate::clipping::{ClipperBridge, FillRule};
use crate::geometry::Matrix;
use crate::path::{Path, StrokeParts, StrokeStyle};

impl RegionFilter {
    /// Removes the regions from a filled path.
    ///
    /// Every subpath is closed first. Regions are brought into the path's
    /// own space through the inverse of `ctm`; a region that cannot be
    /// mapped, or lands beyond the clipping engine's range, is logged and
    /// skipped. Without any usable region the closed path is returned as is.
    #[instrument(skip(self, path), fields(subpaths = path.subpaths().len()))]
    pub fn filter_fill_path(&self, path: &Path, ctm: &Matrix, fill_rule: FillRule) -> Path {
        let mut closed = path.clone();
        closed.close_all_subpaths();

        let mut clips = MultiPolygon::new(vec![]);
        for region in &self.regions {
            match ctm.transform_points(true, &region.vertices()) {
                Ok(points) if self.bridge.fits(&points) => clips.0.push(ClipperBridge::ring(&points)),
                Ok(_) => error!("Skipping region {:?}: mapped through {:?} it leaves the clipping range", region, ctm),
                Err(e) => error!("Skipping region {:?}: cannot map through {:?}: {}", region, ctm, e),
            }
        }
        if clips.0.is_empty() {
            return closed;
        }

        let subject = self.bridge.subject_from_path(&closed, fill_rule);
        let remaining = self.bridge.difference(&subject, &clips);
        debug!("Fill path clipped to {} polygons", remaining.0.len());
        ClipperBridge::to_path(&remaining)
    }

    /// Removes the regions from a stroked path, returning the filled
    /// outline of what is left of the stroke
    #[instrument(skip(self, path, style), fields(width = style.line_width))]
    pub fn filter_stroke_path(&self, path: &Path, ctm: &Matrix, style: &StrokeStyle) -> Path {
        let outline = self.stroke_outline(path, style);
        self.filter_fill_path(&outline, ctm, FillRule::NonZero)
    }

    /// Filled outline of a stroke in path space, caps of zero-length
    /// dashes and dots included
    pub fn stroke_outline(&self, path: &Path, style: &StrokeStyle) -> Path {
        let tolerance = self.config.curve_tolerance;
        let dashed = style.dash.apply(path, tolerance);
        let parts = StrokeParts::from_path(&dashed, tolerance);

        let offset = self
            .bridge
            .offset_polylines(&parts.open, &parts.closed, style, self.config.arc_tolerance);
        let mut outline = ClipperBridge::to_path(&offset);

        let caps = style.cap_subpaths(path, &parts.degenerate, tolerance, self.config.epsilon);
        debug!(
            "Stroke outline: {} offset rings, {} reconstructed caps",
            outline.subpaths().len(),
            caps.len()
        );
        outline.add_subpaths(caps);
        outline
    }
}
