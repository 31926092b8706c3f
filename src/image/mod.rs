//! Image redaction
//!
//! Images are cleaned in one of two ways. Grey or colour-space-less images
//! whose stream filter keeps a plain bit-packed layout have the covered
//! samples cleared directly in their buffer. Everything else is decoded,
//! painted white over the covered pixels and re-encoded.
//!
//! The direct branch clears samples to 0 and the raster branch paints
//! white. For DeviceGray without a Decode array 0 is black, so the two
//! branches can produce different visible results.

pub mod direct;
pub mod palette;
pub mod pdf_image;
pub mod pixel_rect;
pub mod raster;

pub use palette::IndexedPng;
pub use pdf_image::{has_filter, PdfImage};
pub use pixel_rect::{image_rect_to_clean, PixelRect};

use image::ImageFormat;
use lopdf::{Object, ObjectId};

use crate::geometry::Rectangle;

/// Which part of an image a set of regions covers
#[derive(Debug, Clone, PartialEq)]
pub enum CleaningPlan {
    /// A region covers the whole image; it is removed rather than edited
    WholeImage,
    /// Covered areas in the unit image square; empty when nothing is covered
    Areas(Vec<Rectangle>),
}

impl CleaningPlan {
    pub fn is_untouched(&self) -> bool {
        matches!(self, CleaningPlan::Areas(areas) if areas.is_empty())
    }
}

/// Result of editing an image
#[derive(Debug, Clone, PartialEq)]
pub enum RedactedImage {
    /// The image's own sample buffer was edited
    InPlace,
    /// A re-encoded image file
    Encoded { bytes: Vec<u8>, format: ImageFormat },
    /// Edited samples in the image's own layout, without any filter
    Samples(Vec<u8>),
}

/// Identity of an image cleaning: the same image cleaned over the same
/// areas always gives the same result, so callers may memoise on this key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageCleaningKey {
    pub image_id: ObjectId,
    pub areas: Vec<Rectangle>,
}

impl ImageCleaningKey {
    pub fn new(image_id: ObjectId, areas: Vec<Rectangle>) -> Self {
        Self { image_id, areas }
    }
}

/// True when the image's samples can be cleared without decoding.
///
/// Requires a DeviceGray or absent colour space and no filter from
/// `unsupported_filters`, whether given as a single name or in an array.
pub fn supports_direct_cleaning(image: &PdfImage, unsupported_filters: &[String]) -> bool {
    let gray = match image.color_space.as_deref() {
        None => true,
        Some(name) => name == "DeviceGray",
    };
    if !gray {
        return false;
    }

    match &image.filter {
        None | Some(Object::Null) => true,
        Some(filter @ (Object::Name(_) | Object::Array(_))) => {
            !unsupported_filters.iter().any(|name| has_filter(filter, name))
        }
        Some(_) => false,
    }
}
