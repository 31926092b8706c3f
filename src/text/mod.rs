//! Positioned text as the text filter sees it
//!
//! A run is one string shown by a single text-showing operator, already
//! positioned on the page. Each glyph carries its own raw codes and its
//! ascent and descent lines in page space.

pub mod text_array;

pub use text_array::{number_value, TextArray};

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Quad};

/// Directed line between two page-space points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// One glyph of a text run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphInfo {
    /// Character codes exactly as they appear in the content stream
    pub codes: Vec<u8>,
    pub ascent: LineSegment,
    pub descent: LineSegment,
    /// Advance of the glyph in unscaled text space units
    pub unscaled_width: f64,
}

impl GlyphInfo {
    pub fn footprint(&self) -> Quad {
        footprint(&self.ascent, &self.descent)
    }
}

/// A positioned string and the glyphs it is made of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub codes: Vec<u8>,
    pub ascent: LineSegment,
    pub descent: LineSegment,
    pub font_size: f64,
    /// Horizontal scaling in percent, 100 when unscaled
    pub horizontal_scaling: f64,
    pub glyphs: Vec<GlyphInfo>,
}

impl TextRun {
    pub fn footprint(&self) -> Quad {
        footprint(&self.ascent, &self.descent)
    }

    /// Adjustment that moves the pen over `glyph` without painting it
    pub fn spacing_for(&self, glyph: &GlyphInfo) -> f64 {
        -glyph.unscaled_width * 1000.0 / (self.font_size * self.horizontal_scaling / 100.0)
    }
}

fn footprint(ascent: &LineSegment, descent: &LineSegment) -> Quad {
    Quad::from_lines((ascent.start, ascent.end), (descent.start, descent.end))
}
