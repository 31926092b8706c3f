use pdx_redact::geometry::EPSILON;
use pdx_redact::image::{image_rect_to_clean, PixelRect};
use pdx_redact::{quads_intersect, Matrix, Point, Quad, Rectangle, SweepConfig};

fn quad(x: f64, y: f64, w: f64, h: f64) -> Quad {
    Rectangle::new(x, y, w, h).to_quad()
}

#[test]
fn test_rotated_content_against_region() {
    let bridge = SweepConfig::default().bridge();
    // 10x10 square rotated 45 degrees about the origin
    let rotated = quad(0.0, 0.0, 10.0, 10.0).transform(&Matrix::rotation(std::f64::consts::FRAC_PI_4));

    // its corners stick out to x = -7.07 and x = 7.07
    assert!(quads_intersect(&rotated, &quad(-8.0, 6.0, 2.0, 2.0), &bridge, EPSILON));
    assert!(!quads_intersect(&rotated, &quad(-10.0, 0.0, 2.0, 2.0), &bridge, EPSILON));
}

#[test]
fn test_line_content_crossing_region() {
    let bridge = SweepConfig::default().bridge();
    let underline = Quad::new([
        Point::new(0.0, 5.0),
        Point::new(20.0, 5.0),
        Point::new(20.0, 5.0),
        Point::new(0.0, 5.0),
    ]);
    assert!(quads_intersect(&underline, &quad(8.0, 0.0, 4.0, 10.0), &bridge, EPSILON));
    assert!(!quads_intersect(&underline, &quad(8.0, 6.0, 4.0, 10.0), &bridge, EPSILON));
}

#[test]
fn test_point_content_never_intersects_area() {
    let bridge = SweepConfig::default().bridge();
    let dot = Quad::new([Point::new(5.0, 5.0); 4]);
    assert!(!quads_intersect(&dot, &quad(0.0, 0.0, 10.0, 10.0), &bridge, EPSILON));
}

#[test]
fn test_rectangle_transform_roundtrip() {
    let ctm = Matrix::new(200.0, 0.0, 0.0, 100.0, 50.0, 60.0);
    let page = Rectangle::new(150.0, 110.0, 50.0, 25.0);
    let unit = page.transform(&ctm, true).unwrap();
    assert!(unit.equals_with_epsilon(&Rectangle::new(0.5, 0.5, 0.25, 0.25)));
    assert!(unit.transform(&ctm, false).unwrap().equals_with_epsilon(&page));
}

#[test]
fn test_unit_area_to_pixels() {
    assert_eq!(
        image_rect_to_clean(&Rectangle::new(0.0, 0.0, 1.0, 1.0), 33, 17),
        PixelRect {
            x: 0,
            y: 0,
            width: 33,
            height: 17
        }
    );
    assert_eq!(
        image_rect_to_clean(&Rectangle::new(0.5, 0.5, 0.5, 0.5), 8, 8),
        PixelRect {
            x: 4,
            y: 0,
            width: 4,
            height: 4
        }
    );
    assert!(image_rect_to_clean(&Rectangle::new(0.1, 0.1, 0.05, 0.05), 8, 8).is_empty());
}
