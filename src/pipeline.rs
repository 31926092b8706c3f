//! Batch redaction over many content occurrences
//! Created: 2026-10-17 12:03:57 UTC
//!
//! Occurrences are independent, so a sweep runs them in parallel and keeps
//! one result per occurrence in input order. A failing occurrence is
//! reported in its own slot and never affects the others.

use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::clipping::FillRule;
use crate::error::Result;
use crate::geometry::{Matrix, Rectangle};
use crate::image::{PdfImage, RedactedImage};
use crate::path::{Path, StrokeStyle};
use crate::redaction::RegionFilter;
use crate::text::{TextArray, TextRun};
use crate::types::FilterResult;

/// A piece of page content handed over for redaction
#[derive(Debug, Clone)]
pub enum ContentOccurrence {
    Text(TextRun),
    FillPath { path: Path, ctm: Matrix, fill_rule: FillRule },
    StrokePath { path: Path, ctm: Matrix, style: StrokeStyle },
    Image { image: PdfImage, ctm: Matrix },
}

/// Filter result for one occurrence
#[derive(Debug, Clone)]
pub enum OccurrenceOutcome {
    Text(FilterResult<TextArray>),
    Path(FilterResult<Path>),
    /// The image as left by the filter, with in-place edits applied
    Image { image: PdfImage, result: FilterResult<RedactedImage> },
}

impl OccurrenceOutcome {
    pub fn modified(&self) -> bool {
        match self {
            OccurrenceOutcome::Text(r) => r.modified,
            OccurrenceOutcome::Path(r) => r.modified,
            OccurrenceOutcome::Image { result, .. } => result.modified,
        }
    }

    pub fn removed(&self) -> bool {
        match self {
            OccurrenceOutcome::Text(r) => r.is_removed(),
            OccurrenceOutcome::Path(r) => r.is_removed(),
            OccurrenceOutcome::Image { result, .. } => result.is_removed(),
        }
    }
}

/// Sweep statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub untouched: usize,
    pub modified: usize,
    pub removed: usize,
    pub failed: usize,
}

/// Everything a sweep produced
#[derive(Debug)]
pub struct SweepReport {
    pub outcomes: Vec<Result<OccurrenceOutcome>>,
    pub stats: SweepStats,
}

/// Applies one region filter to a batch of occurrences
pub struct SweepPipeline {
    filter: RegionFilter,
}

impl SweepPipeline {
    pub fn new(filter: RegionFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &RegionFilter {
        &self.filter
    }

    #[instrument(skip(self, occurrences), fields(count = occurrences.len()))]
    pub fn run(&self, occurrences: Vec<ContentOccurrence>) -> SweepReport {
        info!("🚦 Starting redaction sweep over {} occurrences", occurrences.len());

        let outcomes: Vec<Result<OccurrenceOutcome>> = occurrences
            .into_par_iter()
            .map(|occurrence| self.process(occurrence))
            .collect();

        let mut stats = SweepStats::default();
        for (index, outcome) in outcomes.iter().enumerate() {
            match outcome {
                Ok(o) if o.removed() => stats.removed += 1,
                Ok(o) if o.modified() => stats.modified += 1,
                Ok(_) => stats.untouched += 1,
                Err(e) => {
                    warn!("Occurrence {} failed: {}", index, e);
                    stats.failed += 1;
                }
            }
        }

        info!(
            "✅ Sweep done: {} modified, {} removed, {} untouched, {} failed",
            stats.modified, stats.removed, stats.untouched, stats.failed
        );
        SweepReport { outcomes, stats }
    }

    /// Filters a single occurrence
    pub fn process(&self, occurrence: ContentOccurrence) -> Result<OccurrenceOutcome> {
        match occurrence {
            ContentOccurrence::Text(run) => Ok(OccurrenceOutcome::Text(self.filter.filter_text(&run))),
            ContentOccurrence::FillPath { path, ctm, fill_rule } => {
                let touched = self.touches(path.bounding_box(), &ctm, 0.0)?;
                let result = self.filter.filter_fill_path(&path, &ctm, fill_rule);
                Ok(OccurrenceOutcome::Path(path_result(touched, result)))
            }
            ContentOccurrence::StrokePath { path, ctm, style } => {
                let touched = self.touches(path.bounding_box(), &ctm, style.line_width / 2.0)?;
                let result = self.filter.filter_stroke_path(&path, &ctm, &style);
                Ok(OccurrenceOutcome::Path(path_result(touched, result)))
            }
            ContentOccurrence::Image { mut image, ctm } => {
                let result = self.filter.filter_image(&mut image, &ctm)?;
                Ok(OccurrenceOutcome::Image { image, result })
            }
        }
    }

    /// Whether any region overlaps the page-space bounds of a path, grown by `margin`
    fn touches(&self, bounds: Option<Rectangle>, ctm: &Matrix, margin: f64) -> Result<bool> {
        let Some(bounds) = bounds else {
            return Ok(false);
        };
        let grown = Rectangle::new(
            bounds.x - margin,
            bounds.y - margin,
            bounds.width + 2.0 * margin,
            bounds.height + 2.0 * margin,
        );
        let page = grown.transform(ctm, false)?;
        Ok(self.filter.regions().iter().any(|r| r.overlaps(&page)))
    }
}

fn path_result(touched: bool, path: Path) -> FilterResult<Path> {
    match (touched, path.is_empty()) {
        (false, _) => FilterResult::unmodified(path),
        (true, true) => FilterResult::removed(),
        (true, false) => FilterResult::modified(path),
    }
}
