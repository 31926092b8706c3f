//! Error types and handling for the redaction engine
//! Created: 2026-10-14 09:12:40 UTC
//!
//! Failures are scoped per content occurrence: a bad image or path aborts
//! only its own filter call, never the sweep it belongs to.

use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Custom result type for redaction operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for redaction operations
#[derive(Error, Debug)]
#[non_exhaustive]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Geometry error: {0}")]
    GeometryError(#[from] GeometryError),

    #[error("Image error: {0}")]
    ImageError(#[from] ImageError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

// -------------------- Sub-Error Categories --------------------

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeometryError {
    #[error("Matrix is not invertible (determinant {determinant:e})")]
    NonInvertible { determinant: f64 },

    #[error("Invalid rectangle: {0}")]
    InvalidRectangle(String),
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ImageError {
    #[error("Image has no BitsPerComponent entry")]
    MissingBitsPerComponent,

    #[error("Unsupported bits per component: {0}")]
    UnsupportedBitsPerComponent(u8),

    #[error("Sample buffer holds {actual} bytes, {expected} required for {width}x{height}")]
    SampleBufferTooShort {
        expected: usize,
        actual: usize,
        width: u32,
        height: u32,
    },

    #[error("Colour {0:?} is not present in the original palette")]
    PaletteColorNotFound([u8; 4]),

    #[error("Unsupported pixel format: {0}")]
    UnsupportedPixelFormat(String),

    #[error("Image has no container bytes for raster editing")]
    MissingContainer,

    #[error("Invalid image dictionary: {0}")]
    InvalidDictionary(String),

    #[error("Cannot decompress image stream: {0}")]
    StreamDecode(String),

    #[error("Codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("PNG decoding failed: {0}")]
    PngDecoding(#[from] png::DecodingError),

    #[error("PNG encoding failed: {0}")]
    PngEncoding(#[from] png::EncodingError),
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Cannot read configuration {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// True when the failure concerns one image and must not abort a sweep
    pub fn is_image_scoped(&self) -> bool {
        matches!(self, Error::ImageError(_))
    }
}
