use image::ImageFormat;
use lopdf::{Dictionary, Object, Stream};
use pdx_redact::image::direct::SampleGrid;
use pdx_redact::image::IndexedPng;
use pdx_redact::{Error, ImageError, Matrix, PdfImage, Rectangle, RedactedImage};

use crate::fixtures::TestFixtures;

fn encoded(result: Option<RedactedImage>) -> (Vec<u8>, ImageFormat) {
    match result {
        Some(RedactedImage::Encoded { bytes, format }) => (bytes, format),
        other => panic!("expected encoded image, got {:?}", other),
    }
}

/// Flate-compressed image XObject holding `samples`
fn flate_image_stream(width: i64, height: i64, color_space: &str, samples: Vec<u8>) -> Stream {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width));
    dict.set("Height", Object::Integer(height));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    let mut stream = Stream::new(dict, samples);
    stream.compress().unwrap();
    assert!(stream.dict.get(b"Filter").is_ok());
    stream
}

#[test]
fn test_gray_quadrant_cleared_in_samples() {
    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 5.0, 5.0)]);
    let mut image = TestFixtures::gray_samples_image(10, 10, 0x7F);

    let result = filter.filter_image(&mut image, &TestFixtures::placement(0.0, 0.0, 10.0)).unwrap();
    assert!(result.modified);
    assert_eq!(result.artifact, Some(RedactedImage::InPlace));

    for row in 0..10 {
        for col in 0..10 {
            let expected = if (5..10).contains(&row) && col < 5 { 0 } else { 0x7F };
            assert_eq!(image.samples[row * 10 + col], expected, "row {} col {}", row, col);
        }
    }
}

#[test]
fn test_bpc1_pixels_read_back_as_zero() {
    let filter = TestFixtures::filter(&[Rectangle::new(4.0, 0.0, 4.0, 1.0)]);
    let mut image = TestFixtures::gray_samples_image(16, 2, 0).with_bits_per_component(1).with_samples(vec![0xFF; 4]);

    let result = filter.filter_image(&mut image, &Matrix::scale(16.0, 2.0)).unwrap();
    assert!(result.modified);

    let grid = SampleGrid::new(&mut image.samples, 16, 2, Some(1)).unwrap();
    for col in 0..16 {
        // the region covers columns 4..8 of the bottom row
        let expected = if (4..8).contains(&col) { 0 } else { 1 };
        assert_eq!(grid.sample(1, col), expected, "col {}", col);
        assert_eq!(grid.sample(0, col), 1);
    }
}

#[test]
fn test_gray_png_repainted_white() {
    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 2.0, 4.0)]);
    let mut image = TestFixtures::gray_samples_image(4, 4, 0)
        .with_color_space("ICCBased")
        .with_container(TestFixtures::black_gray_png(4, 4));

    let result = filter.filter_image(&mut image, &TestFixtures::placement(0.0, 0.0, 4.0)).unwrap();
    let (bytes, format) = encoded(result.artifact);
    assert_eq!(format, ImageFormat::Png);

    let gray = image::load_from_memory(&bytes).unwrap().to_luma8();
    for y in 0..4 {
        assert_eq!(gray.get_pixel(0, y).0, [255]);
        assert_eq!(gray.get_pixel(1, y).0, [255]);
        assert_eq!(gray.get_pixel(2, y).0, [0]);
        assert_eq!(gray.get_pixel(3, y).0, [0]);
    }
}

#[test]
fn test_jpeg_keeps_container() {
    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 16.0, 32.0)]);
    let mut image = TestFixtures::gray_samples_image(32, 32, 0)
        .with_color_space("DeviceRGB")
        .with_filter(Object::Name(b"DCTDecode".to_vec()))
        .with_container(TestFixtures::red_rgb_jpeg(32, 32));

    let result = filter.filter_image(&mut image, &TestFixtures::placement(0.0, 0.0, 32.0)).unwrap();
    let (bytes, format) = encoded(result.artifact);
    assert_eq!(format, ImageFormat::Jpeg);

    let rgb = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert!(rgb.get_pixel(4, 16).0.iter().all(|c| *c > 240));
    let red = rgb.get_pixel(28, 16).0;
    assert!(red[0] > 150 && red[1] < 60);
}

#[test]
fn test_indexed_source_never_written_as_jpeg() {
    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 16.0, 32.0)]);
    let mut image = TestFixtures::gray_samples_image(32, 32, 0)
        .with_color_space("Indexed")
        .with_filter(Object::Name(b"DCTDecode".to_vec()))
        .with_container(TestFixtures::red_rgb_jpeg(32, 32));

    let result = filter.filter_image(&mut image, &TestFixtures::placement(0.0, 0.0, 32.0)).unwrap();
    let (_, format) = encoded(result.artifact);
    assert_eq!(format, ImageFormat::Png);
}

#[test]
fn test_indexed_png_requantized_onto_palette() {
    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 4.0, 2.0)]);
    let mut image = TestFixtures::gray_samples_image(4, 4, 0)
        .with_color_space("Indexed")
        .with_container(TestFixtures::indexed_png(true));

    let result = filter.filter_image(&mut image, &TestFixtures::placement(0.0, 0.0, 4.0)).unwrap();
    let (bytes, format) = encoded(result.artifact);
    assert_eq!(format, ImageFormat::Png);

    let decoded = IndexedPng::decode(&bytes).unwrap().expect("still indexed");
    assert_eq!(decoded.palette, vec![0, 0, 0, 255, 255, 255, 0, 0, 255]);
    assert_eq!(&decoded.indices[..4], &[2, 2, 2, 2]);
    assert_eq!(&decoded.indices[4..8], &[0, 0, 0, 0]);
    assert!(decoded.indices[8..].iter().all(|i| *i == 1));
}

#[test]
fn test_palette_without_white_fails_only_that_image() {
    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 4.0, 2.0)]);
    let mut image = TestFixtures::gray_samples_image(4, 4, 0)
        .with_color_space("Indexed")
        .with_container(TestFixtures::indexed_png(false));

    let err = filter.filter_image(&mut image, &TestFixtures::placement(0.0, 0.0, 4.0)).unwrap_err();
    assert!(matches!(err, Error::ImageError(ImageError::PaletteColorNotFound([255, 255, 255, 255]))));
    assert!(err.is_image_scoped());
}

#[test]
fn test_fully_covered_image_is_removed() {
    let filter = TestFixtures::filter(&[Rectangle::new(-1.0, -1.0, 50.0, 50.0)]);
    let mut image = TestFixtures::gray_samples_image(4, 4, 9);
    let result = filter.filter_image(&mut image, &TestFixtures::placement(0.0, 0.0, 4.0)).unwrap();
    assert!(result.is_removed());
    assert!(image.samples.iter().all(|s| *s == 9));
}

#[test]
fn test_flate_gray_stream_cleared_and_stored_plain() {
    let mut stream = flate_image_stream(10, 10, "DeviceGray", vec![0x7F; 100]);
    let mut image = PdfImage::from_stream((12, 0), &stream).unwrap();
    assert_eq!(image.samples.len(), 100);

    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 5.0, 5.0)]);
    let result = filter.filter_image(&mut image, &TestFixtures::placement(0.0, 0.0, 10.0)).unwrap();
    assert_eq!(result.artifact, Some(RedactedImage::InPlace));

    stream.set_plain_content(image.samples.clone());
    assert!(stream.dict.get(b"Filter").is_err());
    for row in 0..10 {
        for col in 0..10 {
            let expected = if row >= 5 && col < 5 { 0 } else { 0x7F };
            assert_eq!(stream.content[row * 10 + col], expected, "row {} col {}", row, col);
        }
    }
}

#[test]
fn test_flate_rgb_stream_painted_in_samples() {
    let stream = flate_image_stream(4, 4, "DeviceRGB", vec![40; 48]);
    let mut image = PdfImage::from_stream((13, 0), &stream).unwrap();
    assert!(image.container.is_none());

    // left half of the image
    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 2.0, 4.0)]);
    let result = filter.filter_image(&mut image, &TestFixtures::placement(0.0, 0.0, 4.0)).unwrap();
    let samples = match result.artifact {
        Some(RedactedImage::Samples(samples)) => samples,
        other => panic!("expected raw samples, got {:?}", other),
    };

    assert_eq!(samples.len(), 48);
    for pixel in 0..16 {
        let expected = if pixel % 4 < 2 { 255 } else { 40 };
        assert_eq!(&samples[pixel * 3..pixel * 3 + 3], &[expected; 3], "pixel {}", pixel);
    }
}
