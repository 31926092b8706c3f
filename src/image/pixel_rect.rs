//! Normalized image areas to pixel rectangles
//! Created: 2026-10-17

use crate::geometry::Rectangle;

/// Pixel-aligned rectangle with a top-down `y`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Maps a rectangle in the unit image square onto whole pixels.
///
/// Only pixels entirely inside `area` are covered: the left and bottom
/// edges round up, the right and top edges round down. Normalized space is
/// bottom-up, pixel rows are top-down. The result is clamped to the image.
pub fn image_rect_to_clean(area: &Rectangle, width: u32, height: u32) -> PixelRect {
    let (w, h) = (width as f64, height as f64);

    let x = (area.left() * w).ceil();
    let scaled_top = (area.top() * h).floor();
    let y = h - scaled_top;
    let rect_width = (area.right() * w).floor() - x;
    let rect_height = scaled_top - (area.bottom() * h).ceil();

    let x0 = x.clamp(0.0, w);
    let y0 = y.clamp(0.0, h);
    let x1 = (x + rect_width).clamp(0.0, w);
    let y1 = (y + rect_height).clamp(0.0, h);

    PixelRect {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0).max(0.0) as u32,
        height: (y1 - y0).max(0.0) as u32,
    }
}
