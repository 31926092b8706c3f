//! 8-bit indexed PNG handling
//! Created: 2026-10-17 07:39:50 UTC
//!
//! Indexed images are expanded to RGBA for editing and then mapped back
//! onto their original palette. Every colour in the edited canvas must
//! already be a palette entry; an unknown colour fails the image.

use std::collections::HashMap;
use std::io::Cursor;

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::{ImageError, Result};

/// Decoded 8-bit palette image with its palette and transparency intact
#[derive(Debug, Clone)]
pub struct IndexedPng {
    pub width: u32,
    pub height: u32,
    /// RGB triples as stored in the PLTE chunk
    pub palette: Vec<u8>,
    /// Alpha per palette entry from the tRNS chunk, possibly shorter than the palette
    pub trns: Vec<u8>,
    pub indices: Vec<u8>,
}

impl IndexedPng {
    /// Decodes `bytes` when it is an 8-bit indexed PNG, `None` for any other PNG
    pub fn decode(bytes: &[u8]) -> Result<Option<Self>> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::IDENTITY);
        let mut reader = decoder.read_info().map_err(ImageError::from)?;

        let info = reader.info();
        if info.color_type != png::ColorType::Indexed || info.bit_depth != png::BitDepth::Eight {
            return Ok(None);
        }
        let palette = info.palette.as_ref().map(|p| p.to_vec()).unwrap_or_default();
        let trns = info.trns.as_ref().map(|t| t.to_vec()).unwrap_or_default();

        let mut buffer = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buffer).map_err(ImageError::from)?;
        buffer.truncate(frame.buffer_size());

        debug!("indexed png {}x{} with {} palette entries", frame.width, frame.height, palette.len() / 3);
        Ok(Some(Self {
            width: frame.width,
            height: frame.height,
            palette,
            trns,
            indices: buffer,
        }))
    }

    pub fn palette_color(&self, index: u8) -> [u8; 4] {
        let i = index as usize;
        let rgb = self.palette.get(i * 3..i * 3 + 3).unwrap_or(&[0, 0, 0]);
        let alpha = self.trns.get(i).copied().unwrap_or(u8::MAX);
        [rgb[0], rgb[1], rgb[2], alpha]
    }

    /// Renders the palette image onto a full-colour canvas
    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let index = self.indices[(y * self.width + x) as usize];
            Rgba(self.palette_color(index))
        })
    }

    /// Maps every canvas pixel back to its palette index
    pub fn requantize(&self, canvas: &RgbaImage) -> Result<Vec<u8>> {
        let mut lookup: HashMap<[u8; 4], u8> = HashMap::new();
        for index in 0..(self.palette.len() / 3).min(256) {
            lookup.entry(self.palette_color(index as u8)).or_insert(index as u8);
        }

        let mut indices = Vec::with_capacity(canvas.len() / 4);
        for pixel in canvas.pixels() {
            let index = lookup.get(&pixel.0).ok_or(ImageError::PaletteColorNotFound(pixel.0))?;
            indices.push(*index);
        }
        Ok(indices)
    }

    /// Encodes `indices` as an indexed PNG using this image's palette
    pub fn encode(&self, indices: &[u8]) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, self.width, self.height);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(self.palette.clone());
            if !self.trns.is_empty() {
                encoder.set_trns(self.trns.clone());
            }
            let mut writer = encoder.write_header().map_err(ImageError::from)?;
            writer.write_image_data(indices).map_err(ImageError::from)?;
            writer.finish().map_err(ImageError::from)?;
        }
        Ok(bytes)
    }
}
