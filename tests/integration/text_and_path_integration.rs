use geo::Area;
use lopdf::Object;
use pdx_redact::path::Segment;
use pdx_redact::text::number_value;
use pdx_redact::geometry::EPSILON;
use pdx_redact::{
    quads_intersect, DashPattern, FillRule, LineCap, LineSegment, Matrix, Path, Point, Quad, Rectangle, StrokeStyle,
    SweepConfig,
};

use crate::fixtures::TestFixtures;

fn string_at(items: &[Object], index: usize) -> &[u8] {
    match &items[index] {
        Object::String(bytes, _) => bytes,
        other => panic!("expected string at {}, got {:?}", index, other),
    }
}

fn filled_area(path: &Path) -> f64 {
    SweepConfig::default()
        .bridge()
        .subject_from_path(path, FillRule::NonZero)
        .unsigned_area()
}

fn horizontal_line(from: f64, to: f64, width: f64) -> (Path, StrokeStyle) {
    let mut path = Path::new();
    path.move_to(from, 0.0).line_to(to, 0.0);
    let style = StrokeStyle {
        line_width: width,
        ..StrokeStyle::default()
    };
    (path, style)
}

#[test]
fn test_middle_glyph_becomes_spacing() {
    let filter = TestFixtures::filter(&[Rectangle::new(112.0, 690.0, 6.0, 30.0)]);
    let result = filter.filter_text(&TestFixtures::text_run_abc());

    assert!(result.modified);
    let array = result.artifact.unwrap();
    let items = array.items();
    assert_eq!(items.len(), 3);
    assert_eq!(string_at(items, 0), b"A");
    let spacing = number_value(&items[1]).unwrap();
    assert!((spacing + 10.0 * 1000.0 / 12.0).abs() < 1e-3);
    assert_eq!(string_at(items, 2), b"C");
}

#[test]
fn test_region_equal_to_glyph_box_spares_neighbours() {
    let filter = TestFixtures::filter(&[Rectangle::new(110.0, 697.0, 10.0, 12.0)]);
    let array = filter.filter_text(&TestFixtures::text_run_abc()).artifact.unwrap();

    assert_eq!(array.items().len(), 3);
    assert_eq!(string_at(array.items(), 0), b"A");
    assert_eq!(string_at(array.items(), 2), b"C");
}

#[test]
fn test_fully_covered_run_collapses_to_one_adjustment() {
    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 1000.0, 1000.0)]);
    let result = filter.filter_text(&TestFixtures::text_run_abc());

    assert!(result.modified);
    let array = result.artifact.unwrap();
    assert_eq!(array.items().len(), 1);
    let total = number_value(&array.items()[0]).unwrap();
    assert!((total + 2500.0).abs() < 1e-2);
}

#[test]
fn test_run_clear_of_regions_is_unmodified() {
    let filter = TestFixtures::filter(&[Rectangle::new(0.0, 0.0, 50.0, 50.0)]);
    let result = filter.filter_text(&TestFixtures::text_run_abc());

    assert!(!result.modified);
    let array = result.artifact.unwrap();
    assert_eq!(array.items().len(), 1);
    assert_eq!(string_at(array.items(), 0), b"ABC");
    assert!(matches!(array.to_operand(), Object::Array(items) if items.len() == 1));
}

#[test]
fn test_fill_with_disjoint_region_keeps_area() {
    let filter = TestFixtures::filter(&[Rectangle::new(500.0, 500.0, 10.0, 10.0)]);
    let path = TestFixtures::square_path(0.0, 0.0, 20.0);

    let result = filter.filter_fill_path(&path, &Matrix::identity(), FillRule::EvenOdd);
    assert!((filled_area(&result) - 400.0).abs() < 1e-6);
}

#[test]
fn test_fill_loses_overlap_through_translation() {
    let filter = TestFixtures::filter(&[Rectangle::new(100.0, 100.0, 10.0, 20.0)]);
    let path = TestFixtures::square_path(0.0, 0.0, 20.0);

    let result = filter.filter_fill_path(&path, &Matrix::translation(100.0, 100.0), FillRule::NonZero);
    assert!((filled_area(&result) - 200.0).abs() < 1e-6);
    let bounds = result.bounding_box().unwrap();
    assert!((bounds.left() - 10.0).abs() < 1e-6);
}

#[test]
fn test_fully_covered_fill_is_empty() {
    let filter = TestFixtures::filter(&[Rectangle::new(-1.0, -1.0, 30.0, 30.0)]);
    let result = filter.filter_fill_path(&TestFixtures::square_path(0.0, 0.0, 20.0), &Matrix::identity(), FillRule::NonZero);
    assert!(result.is_empty());
}

#[test]
fn test_dotted_line_keeps_round_dots_outside_region() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(35.0, 0.0);
    let style = StrokeStyle {
        line_width: 2.0,
        cap: LineCap::Round,
        dash: DashPattern::new(vec![0.0, 10.0], 0.0),
        ..StrokeStyle::default()
    };

    // dots at x = 0, 10, 20 and 30; the region swallows the one at 20
    let filter = TestFixtures::filter(&[Rectangle::new(15.0, -5.0, 10.0, 10.0)]);
    let result = filter.filter_stroke_path(&path, &Matrix::identity(), &style);

    assert_eq!(result.subpaths().len(), 3);
    assert!(result.subpaths().iter().all(|s| s.closed));
    let bounds = result.bounding_box().unwrap();
    assert!((bounds.left() + 1.0).abs() < 1e-3);
    assert!((bounds.right() - 31.0).abs() < 1e-3);
    assert!(result
        .subpaths()
        .iter()
        .all(|s| s.start.x < 15.0 || s.start.x > 25.0));
}

#[test]
fn test_round_cap_circle_starts_at_top() {
    let mut path = Path::new();
    path.move_to(5.0, 5.0).line_to(5.0, 5.0);
    let style = StrokeStyle {
        line_width: 6.0,
        cap: LineCap::Round,
        ..StrokeStyle::default()
    };

    let outline = TestFixtures::filter(&[]).stroke_outline(&path, &style);
    assert_eq!(outline.subpaths().len(), 1);
    let circle = &outline.subpaths()[0];
    assert_eq!(circle.start, Point::new(5.0, 8.0));
    assert!(circle.segments.iter().all(|s| matches!(s, Segment::Cubic { .. })));
}

#[test]
fn test_flat_run_spanning_region_loses_middle_glyph() {
    let mut run = TestFixtures::text_run_abc();
    run.ascent = run.descent;
    for glyph in &mut run.glyphs {
        glyph.ascent = glyph.descent;
    }

    // no glyph corner lies inside the region, the flat boxes only cross it
    let filter = TestFixtures::filter(&[Rectangle::new(112.0, 690.0, 6.0, 30.0)]);
    let result = filter.filter_text(&run);
    assert!(result.modified);
    let array = result.artifact.unwrap();
    assert_eq!(array.items().len(), 3);
    assert_eq!(string_at(array.items(), 0), b"A");
    assert_eq!(string_at(array.items(), 2), b"C");
}

#[test]
fn test_collinear_content_spanning_region() {
    let bridge = SweepConfig::default().bridge();
    let region = Rectangle::new(8.0, 0.0, 4.0, 10.0).to_quad();

    let spread = Quad::new([
        Point::new(0.0, 5.0),
        Point::new(5.0, 5.0),
        Point::new(15.0, 5.0),
        Point::new(20.0, 5.0),
    ]);
    assert!(quads_intersect(&spread, &region, &bridge, EPSILON));

    let diagonal = LineSegment::new(Point::new(0.0, -10.0), Point::new(20.0, 30.0));
    let slanted = Quad::from_lines((diagonal.start, diagonal.end), (diagonal.start, diagonal.end));
    assert!(quads_intersect(&slanted, &region, &bridge, EPSILON));

    let above = Quad::new([
        Point::new(0.0, 12.0),
        Point::new(20.0, 12.0),
        Point::new(20.0, 12.0),
        Point::new(0.0, 12.0),
    ]);
    assert!(!quads_intersect(&above, &region, &bridge, EPSILON));
}

#[test]
fn test_stroke_outline_covers_line_width() {
    let (path, style) = horizontal_line(0.0, 20.0, 2.0);
    let outline = TestFixtures::filter(&[]).stroke_outline(&path, &style);

    assert!((filled_area(&outline) - 40.0).abs() < 1e-3);
    let bounds = outline.bounding_box().unwrap();
    assert!((bounds.left() - 0.0).abs() < 1e-6);
    assert!((bounds.right() - 20.0).abs() < 1e-6);
    assert!((bounds.bottom() + 1.0).abs() < 1e-6);
    assert!((bounds.top() - 1.0).abs() < 1e-6);
}

#[test]
fn test_stroke_cut_in_the_middle_keeps_both_ends() {
    let (path, style) = horizontal_line(0.0, 20.0, 2.0);
    let filter = TestFixtures::filter(&[Rectangle::new(8.0, -5.0, 4.0, 10.0)]);
    let result = filter.filter_stroke_path(&path, &Matrix::identity(), &style);

    assert_eq!(result.subpaths().len(), 2);
    assert!((filled_area(&result) - 32.0).abs() < 1e-3);
}

#[test]
fn test_square_capped_corner_stroke_area() {
    let mut path = Path::new();
    path.move_to(0.0, 0.0).line_to(10.0, 0.0).line_to(10.0, 10.0);
    let style = StrokeStyle {
        line_width: 2.0,
        cap: LineCap::ProjectingSquare,
        ..StrokeStyle::default()
    };

    // two 10x2 arms sharing a unit square, two 2x1 square ends and the mitred corner
    let outline = TestFixtures::filter(&[]).stroke_outline(&path, &style);
    assert!((filled_area(&outline) - 44.0).abs() < 1e-3);
    let bounds = outline.bounding_box().unwrap();
    assert!((bounds.left() + 1.0).abs() < 1e-6);
    assert!((bounds.top() - 11.0).abs() < 1e-6);
}
