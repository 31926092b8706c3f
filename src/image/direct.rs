//! In-place clearing of bit-packed image samples
//! Created: 2026-10-16
//!
//! Works on the raw sample stream without decoding it: rows are
//! `ceil(width * bpc / 8)` bytes long and components are packed from the
//! most significant bit of each byte. Cleared components are set to 0.

use tracing::debug;

use super::PixelRect;
use crate::error::{ImageError, Result};

const SUPPORTED_BITS: [u8; 5] = [1, 2, 4, 8, 16];

/// Validated view over a sample buffer
pub struct SampleGrid<'a> {
    samples: &'a mut [u8],
    width: u32,
    height: u32,
    bpc: u8,
    stride: usize,
}

impl<'a> SampleGrid<'a> {
    pub fn new(samples: &'a mut [u8], width: u32, height: u32, bpc: Option<u8>) -> Result<Self> {
        let bpc = bpc.ok_or(ImageError::MissingBitsPerComponent)?;
        if !SUPPORTED_BITS.contains(&bpc) {
            return Err(ImageError::UnsupportedBitsPerComponent(bpc).into());
        }

        let stride = row_stride(width, bpc);
        let expected = stride * height as usize;
        if samples.len() < expected {
            return Err(ImageError::SampleBufferTooShort {
                expected,
                actual: samples.len(),
                width,
                height,
            }
            .into());
        }

        Ok(Self {
            samples,
            width,
            height,
            bpc,
            stride,
        })
    }

    /// Zeroes every component inside `rect`
    pub fn clear(&mut self, rect: &PixelRect) {
        let x_end = (rect.x + rect.width).min(self.width);
        let y_end = (rect.y + rect.height).min(self.height);
        debug!("clearing pixels x {}..{} y {}..{} at {} bpc", rect.x, x_end, rect.y, y_end, self.bpc);

        for row in rect.y..y_end {
            for col in rect.x..x_end {
                self.clear_pixel(row, col);
            }
        }
    }

    fn clear_pixel(&mut self, row: u32, col: u32) {
        let bit_index = row as usize * self.stride * 8 + col as usize * self.bpc as usize;
        let byte = bit_index / 8;

        if self.bpc == 16 {
            self.samples[byte] = 0;
            self.samples[byte + 1] = 0;
            return;
        }
        self.samples[byte] &= !component_mask(self.bpc, bit_index % 8);
    }

    /// Component value at a pixel, for inspection
    pub fn sample(&self, row: u32, col: u32) -> u16 {
        let bit_index = row as usize * self.stride * 8 + col as usize * self.bpc as usize;
        let byte = bit_index / 8;
        match self.bpc {
            16 => u16::from_be_bytes([self.samples[byte], self.samples[byte + 1]]),
            8 => self.samples[byte] as u16,
            bpc => {
                let shift = 8 - bpc as usize - bit_index % 8;
                ((self.samples[byte] >> shift) & ((1u8 << bpc) - 1)) as u16
            }
        }
    }
}

pub fn row_stride(width: u32, bpc: u8) -> usize {
    (width as usize * bpc as usize + 7) / 8
}

/// Bits of a `bpc`-wide component starting `bit_offset` bits into its byte
fn component_mask(bpc: u8, bit_offset: usize) -> u8 {
    let first_component_in_byte = (((1u16 << bpc) - 1) << (8 - bpc)) as u8;
    first_component_in_byte >> bit_offset
}

/// Clears every rectangle in the image's own sample buffer
pub fn clean_samples(samples: &mut [u8], width: u32, height: u32, bpc: Option<u8>, rects: &[PixelRect]) -> Result<()> {
    let mut grid = SampleGrid::new(samples, width, height, bpc)?;
    for rect in rects.iter().filter(|r| !r.is_empty()) {
        grid.clear(rect);
    }
    Ok(())
}
