//! RGBA raster primitives: alpha-blended lines, rectangles and ellipses.
//!
//! Everything clamps against the buffer bounds and silently drops
//! out-of-range pixels; overlay geometry routinely extends past the capture.

use image::{Rgba, RgbaImage};

pub type Color = Rgba<u8>;

/// Alpha-over blend of `color` onto the pixel at `(x, y)`, if in bounds.
pub fn blend_px(img: &mut RgbaImage, x: i64, y: i64, color: Color) {
    if x < 0 || y < 0 || x >= i64::from(img.width()) || y >= i64::from(img.height()) {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let a = u32::from(color.0[3]);
    if a == 0 {
        return;
    }
    for c in 0..3 {
        let src = u32::from(color.0[c]);
        let bg = u32::from(dst.0[c]);
        dst.0[c] = ((src * a + bg * (255 - a)) / 255) as u8;
    }
    dst.0[3] = dst.0[3].max(color.0[3]);
}

/// Horizontal line across `[x0, x1]` at row `y`, `width` pixels thick.
pub fn hline(img: &mut RgbaImage, x0: i64, x1: i64, y: i64, width: i64, color: Color) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    for dy in 0..width {
        for x in x0..=x1 {
            blend_px(img, x, y + dy, color);
        }
    }
}

/// Vertical line across `[y0, y1]` at column `x`, `width` pixels thick.
pub fn vline(img: &mut RgbaImage, x: i64, y0: i64, y1: i64, width: i64, color: Color) {
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    for dx in 0..width {
        for y in y0..=y1 {
            blend_px(img, x + dx, y, color);
        }
    }
}

/// Filled axis-aligned rectangle, corners inclusive.
pub fn fill_rect(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            blend_px(img, x, y, color);
        }
    }
}

/// Rectangle outline, `width` pixels thick, drawn inward from the edges.
pub fn stroke_rect(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, width: i64, color: Color) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    hline(img, x0, x1, y0, width, color);
    hline(img, x0, x1, y1 - width + 1, width, color);
    vline(img, x0, y0 + width, y1 - width, width, color);
    vline(img, x1 - width + 1, y0 + width, y1 - width, width, color);
}

/// Small filled disc, used for anchor markers.
pub fn fill_disc(img: &mut RgbaImage, cx: i64, cy: i64, r: i64, color: Color) {
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r * r {
                blend_px(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Ellipse outline inscribed in the bounding box `(x0, y0)..(x1, y1)`.
///
/// Plotted in two symmetric passes (over x, then over y) so steep arcs near
/// the horizontal extremes stay connected.
pub fn stroke_ellipse(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
    let rx = (x1 - x0).abs() as f64 / 2.0;
    let ry = (y1 - y0).abs() as f64 / 2.0;
    let cx = (x0 + x1) as f64 / 2.0;
    let cy = (y0 + y1) as f64 / 2.0;
    if rx < 0.5 || ry < 0.5 {
        blend_px(img, cx.round() as i64, cy.round() as i64, color);
        return;
    }

    let mut x = -rx;
    while x <= rx {
        let dy = ry * (1.0 - (x / rx).powi(2)).max(0.0).sqrt();
        blend_px(img, (cx + x).round() as i64, (cy - dy).round() as i64, color);
        blend_px(img, (cx + x).round() as i64, (cy + dy).round() as i64, color);
        x += 1.0;
    }
    let mut y = -ry;
    while y <= ry {
        let dx = rx * (1.0 - (y / ry).powi(2)).max(0.0).sqrt();
        blend_px(img, (cx - dx).round() as i64, (cy + y).round() as i64, color);
        blend_px(img, (cx + dx).round() as i64, (cy + y).round() as i64, color);
        y += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255]))
    }

    #[test]
    fn blend_is_opaque_at_full_alpha() {
        let mut img = black(4, 4);
        blend_px(&mut img, 1, 1, Rgba([200, 100, 50, 255]));
        assert_eq!(img.get_pixel(1, 1).0, [200, 100, 50, 255]);
    }

    #[test]
    fn blend_ignores_out_of_bounds() {
        let mut img = black(4, 4);
        blend_px(&mut img, -1, 0, Rgba([255, 255, 255, 255]));
        blend_px(&mut img, 4, 7, Rgba([255, 255, 255, 255]));
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn semi_transparent_blend_mixes_with_background() {
        let mut img = black(2, 2);
        blend_px(&mut img, 0, 0, Rgba([255, 0, 0, 128]));
        let p = img.get_pixel(0, 0);
        assert!(p.0[0] > 100 && p.0[0] < 150);
        assert_eq!(p.0[1], 0);
    }

    #[test]
    fn stroke_rect_leaves_interior_untouched() {
        let mut img = black(10, 10);
        stroke_rect(&mut img, 1, 1, 8, 8, 1, Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(8, 1).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(4, 4).0, [0, 0, 0, 255]);
    }

    #[test]
    fn ellipse_touches_its_bounding_box_midpoints() {
        let mut img = black(21, 21);
        stroke_ellipse(&mut img, 0, 0, 20, 20, Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(10, 0).0[0], 255);
        assert_eq!(img.get_pixel(10, 20).0[0], 255);
        assert_eq!(img.get_pixel(0, 10).0[0], 255);
        assert_eq!(img.get_pixel(20, 10).0[0], 255);
        assert_eq!(img.get_pixel(10, 10).0[0], 0);
    }
}
