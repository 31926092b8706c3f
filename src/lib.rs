//! Region-based redaction engine for PDF page content
//! Created: 2026-10-14
//!
//! Removes everything that falls inside a set of page-space rectangles from
//! already-positioned content: glyphs of text runs, filled and stroked line
//! art, and image samples. Content parsing and document I/O are left to the
//! caller; this crate works on the positioned occurrences it is handed.

// Configuration and errors
pub mod config;
pub mod error;
pub mod types;

// Geometry and clipping
pub mod clipping;
pub mod geometry;
pub mod intersection;
pub mod path;

// Content models
pub mod image;
pub mod text;

// Filters and batch processing
pub mod pipeline;
pub mod redaction;

// Shared Utilities
pub mod utils;

// Re-exports for crate consumers
pub use clipping::FillRule;
pub use config::SweepConfig;
pub use error::{ConfigError, Error, GeometryError, ImageError, Result};
pub use geometry::{Matrix, Point, Quad, Rectangle};
pub use self::image::{CleaningPlan, ImageCleaningKey, PdfImage, RedactedImage};
pub use intersection::quads_intersect;
pub use path::{DashPattern, LineCap, LineJoin, Path, StrokeStyle};
pub use pipeline::{ContentOccurrence, OccurrenceOutcome, SweepPipeline, SweepReport, SweepStats};
pub use redaction::RegionFilter;
pub use text::{GlyphInfo, LineSegment, TextArray, TextRun};
pub use types::FilterResult;
pub use utils::init_logging;
