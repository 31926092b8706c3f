//! Decode, paint white, re-encode
//! Created: 2026-10-17 08:16:22 UTC
//!
//! Used for images whose samples cannot be edited in place. The decoded
//! image keeps its pixel layout through the edit; 8-bit palette PNGs go
//! through an RGBA canvas and are mapped back onto their palette.
//!
//! Images without a container are painted in their unfiltered samples
//! when the layout is 8-bit gray, RGB or indexed over an RGB table.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma, Pixel, Rgb, RgbImage, Rgba};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use lopdf::Object;
use tracing::debug;

use super::{IndexedPng, PdfImage, PixelRect, RedactedImage};
use crate::error::{ImageError, Result};

const JPEG_QUALITY: u8 = 100;

/// Paints every rectangle white in the image's container and re-encodes it
pub fn clean_raster(image: &PdfImage, rects: &[PixelRect]) -> Result<RedactedImage> {
    let Some(bytes) = image.container.as_deref() else {
        return clean_samples(image, rects);
    };
    let source_format = image::guess_format(bytes).map_err(ImageError::from)?;

    if source_format == ImageFormat::Png {
        if let Some(indexed) = IndexedPng::decode(bytes)? {
            debug!("image {:?}: editing through palette canvas", image.id);
            let mut canvas = indexed.to_rgba();
            fill_white(&mut canvas, rects);
            let indices = indexed.requantize(&canvas)?;
            return Ok(RedactedImage::Encoded {
                bytes: indexed.encode(&indices)?,
                format: ImageFormat::Png,
            });
        }
    }

    let decoded = image::load_from_memory_with_format(bytes, source_format).map_err(ImageError::from)?;
    let edited = fill_preserving_layout(decoded, rects)?;

    let indexed = image.color_space.as_deref() == Some("Indexed");
    let format = output_format(source_format, indexed);
    debug!("image {:?}: re-encoding {:?} as {:?}", image.id, source_format, format);

    Ok(RedactedImage::Encoded {
        bytes: encode(&edited, format)?,
        format,
    })
}

/// Paints white over raw 8-bit samples and returns the edited buffer
fn clean_samples(image: &PdfImage, rects: &[PixelRect]) -> Result<RedactedImage> {
    if !matches!(image.filter, None | Some(Object::Null)) {
        return Err(ImageError::MissingContainer.into());
    }
    if image.bits_per_component != Some(8) {
        return Err(ImageError::UnsupportedPixelFormat(format!(
            "{:?} bits per component without a container",
            image.bits_per_component
        ))
        .into());
    }

    let (width, height) = (image.width, image.height);
    let samples = match image.color_space.as_deref() {
        None | Some("DeviceGray") => {
            let mut canvas: GrayImage = sample_canvas(image, 1)?;
            paint(&mut canvas, rects, Luma([u8::MAX]));
            canvas.into_raw()
        }
        Some("DeviceRGB") => {
            let mut canvas: RgbImage = sample_canvas(image, 3)?;
            paint(&mut canvas, rects, Rgb([u8::MAX; 3]));
            canvas.into_raw()
        }
        Some("Indexed") => {
            let palette = image.lookup.clone().ok_or_else(|| {
                ImageError::UnsupportedPixelFormat("Indexed without an inline RGB table".to_string())
            })?;
            let indices = sample_canvas::<Luma<u8>>(image, 1)?.into_raw();
            let indexed = IndexedPng {
                width,
                height,
                palette,
                trns: Vec::new(),
                indices,
            };
            let mut canvas = indexed.to_rgba();
            fill_white(&mut canvas, rects);
            indexed.requantize(&canvas)?
        }
        Some(other) => return Err(ImageError::UnsupportedPixelFormat(format!("{} samples", other)).into()),
    };

    debug!("image {:?}: painted {} areas in raw samples", image.id, rects.len());
    Ok(RedactedImage::Samples(samples))
}

/// Views the first `width * height * channels` samples as an image buffer
fn sample_canvas<P>(image: &PdfImage, channels: usize) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    let expected = image.width as usize * image.height as usize * channels;
    let too_short = || ImageError::SampleBufferTooShort {
        expected,
        actual: image.samples.len(),
        width: image.width,
        height: image.height,
    };
    let samples = image.samples.get(..expected).ok_or_else(too_short)?.to_vec();
    ImageBuffer::from_raw(image.width, image.height, samples).ok_or_else(|| too_short().into())
}

/// Container to write: the source format, but never JPEG for palette images
pub fn output_format(source: ImageFormat, indexed: bool) -> ImageFormat {
    if indexed && source == ImageFormat::Jpeg {
        ImageFormat::Png
    } else {
        source
    }
}

fn fill_preserving_layout(decoded: DynamicImage, rects: &[PixelRect]) -> Result<DynamicImage> {
    let color = decoded.color();
    let edited = match color {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => {
            let mut canvas = decoded.to_rgba8();
            fill_white(&mut canvas, rects);
            DynamicImage::ImageRgba8(canvas)
        }
        ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16 => {
            let mut canvas = decoded.to_rgba16();
            fill_white(&mut canvas, rects);
            DynamicImage::ImageRgba16(canvas)
        }
        ColorType::Rgb32F | ColorType::Rgba32F => {
            let mut canvas = decoded.to_rgba32f();
            fill_white(&mut canvas, rects);
            DynamicImage::ImageRgba32F(canvas)
        }
        other => return Err(ImageError::UnsupportedPixelFormat(format!("{:?}", other)).into()),
    };

    Ok(match color {
        ColorType::L8 => DynamicImage::ImageLuma8(edited.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(edited.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(edited.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(edited.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(edited.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(edited.to_rgb16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(edited.to_rgb32f()),
        _ => edited,
    })
}

/// Fills each non-empty rectangle with opaque white
fn fill_white<S>(canvas: &mut ImageBuffer<Rgba<S>, Vec<S>>, rects: &[PixelRect])
where
    Rgba<S>: Pixel<Subpixel = S>,
    S: image::Primitive,
{
    paint(canvas, rects, Rgba([S::DEFAULT_MAX_VALUE; 4]));
}

fn paint<P: Pixel>(canvas: &mut ImageBuffer<P, Vec<P::Subpixel>>, rects: &[PixelRect], color: P) {
    for rect in rects.iter().filter(|r| !r.is_empty()) {
        let area = Rect::at(rect.x as i32, rect.y as i32).of_size(rect.width, rect.height);
        draw_filled_rect_mut(canvas, area, color);
    }
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    if format == ImageFormat::Jpeg {
        let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
        image.write_with_encoder(encoder).map_err(ImageError::from)?;
    } else {
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .map_err(ImageError::from)?;
    }
    Ok(bytes)
}
