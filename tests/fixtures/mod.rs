//! Shared builders for redaction tests; images are generated in memory

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use pdx_redact::{GlyphInfo, LineSegment, Matrix, Path, PdfImage, Point, Rectangle, RegionFilter, SweepConfig, TextRun};

pub struct TestFixtures;

impl TestFixtures {
    pub fn filter(regions: &[Rectangle]) -> RegionFilter {
        RegionFilter::new(regions.to_vec(), SweepConfig::default()).unwrap()
    }

    /// "ABC" at 12pt, each glyph 10 units wide, starting at (100, 700)
    pub fn text_run_abc() -> TextRun {
        let glyphs = b"ABC"
            .iter()
            .enumerate()
            .map(|(i, code)| {
                let x0 = 100.0 + 10.0 * i as f64;
                GlyphInfo {
                    codes: vec![*code],
                    ascent: LineSegment::new(Point::new(x0, 709.0), Point::new(x0 + 10.0, 709.0)),
                    descent: LineSegment::new(Point::new(x0, 697.0), Point::new(x0 + 10.0, 697.0)),
                    unscaled_width: 10.0,
                }
            })
            .collect();

        TextRun {
            codes: b"ABC".to_vec(),
            ascent: LineSegment::new(Point::new(100.0, 709.0), Point::new(130.0, 709.0)),
            descent: LineSegment::new(Point::new(100.0, 697.0), Point::new(130.0, 697.0)),
            font_size: 12.0,
            horizontal_scaling: 100.0,
            glyphs,
        }
    }

    pub fn square_path(x: f64, y: f64, size: f64) -> Path {
        let mut path = Path::new();
        path.rectangle(x, y, size, size);
        path
    }

    /// Maps the unit image square onto a `size` square at (x, y)
    pub fn placement(x: f64, y: f64, size: f64) -> Matrix {
        Matrix::new(size, 0.0, 0.0, size, x, y)
    }

    /// Uncompressed 8-bit DeviceGray image filled with `value`
    pub fn gray_samples_image(width: u32, height: u32, value: u8) -> PdfImage {
        PdfImage::new((10, 0), width, height)
            .with_bits_per_component(8)
            .with_color_space("DeviceGray")
            .with_samples(vec![value; (width * height) as usize])
    }

    pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    pub fn black_gray_png(width: u32, height: u32) -> Vec<u8> {
        Self::encode(&DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([0]))), ImageFormat::Png)
    }

    pub fn red_rgb_jpeg(width: u32, height: u32) -> Vec<u8> {
        Self::encode(&DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 0, 0]))), ImageFormat::Jpeg)
    }

    /// 4x4 indexed PNG: palette black, white, blue; all pixels black except
    /// a blue top row
    pub fn indexed_png(with_white: bool) -> Vec<u8> {
        let palette: Vec<u8> = if with_white {
            vec![0, 0, 0, 255, 255, 255, 0, 0, 255]
        } else {
            vec![0, 0, 0, 0, 0, 255]
        };
        let blue = if with_white { 2 } else { 1 };
        let mut indices = vec![0u8; 16];
        indices[..4].fill(blue);

        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 4, 4);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(palette);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&indices).unwrap();
        }
        bytes
    }
}
