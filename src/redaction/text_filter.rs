//! Glyph-level text redaction
//! Created: 2026-10-16

use tracing::{debug, instrument, warn};

use super::RegionFilter;
use crate::text::{TextArray, TextRun};
use crate::types::FilterResult;

impl RegionFilter {
    /// Rebuilds a text run without the glyphs that touch a region.
    ///
    /// A run clear of every region comes back unmodified as its original
    /// string. Otherwise each glyph is tested on its own; covered glyphs
    /// become spacing adjustments so the remaining glyphs keep their
    /// positions. Such a result is always marked modified.
    #[instrument(skip(self, run), fields(glyphs = run.glyphs.len()))]
    pub fn filter_text(&self, run: &TextRun) -> FilterResult<TextArray> {
        let mut array = TextArray::new();

        if !self.intersects(&run.footprint()) {
            array.add_string(&run.codes);
            return FilterResult::unmodified(array);
        }

        if run.font_size == 0.0 || run.horizontal_scaling == 0.0 {
            warn!(
                "Text run with font size {} and scaling {}%: removed glyphs leave no spacing",
                run.font_size, run.horizontal_scaling
            );
        }

        let mut removed = 0;
        for glyph in &run.glyphs {
            if self.intersects(&glyph.footprint()) {
                array.add_number(run.spacing_for(glyph));
                removed += 1;
            } else {
                array.add_string(&glyph.codes);
            }
        }

        debug!("Removed {} of {} glyphs", removed, run.glyphs.len());
        FilterResult::modified(array)
    }
}
