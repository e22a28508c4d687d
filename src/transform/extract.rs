//! Geometric region extraction.
//!
//! Each extractor allocates a fresh buffer with the region's bounding box at
//! the origin. Pixels outside the shape, or outside the source, are left
//! transparent. All loops are half-open and shape boundaries count as inside.

use serde::Deserialize;

use crate::types::{Colour, RasterImage};

/// Slack for points that sit exactly on the ellipse boundary.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// A region to cut out of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase", deny_unknown_fields)]
pub enum Crop {
    Rect {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
    Circle {
        cx: i64,
        cy: i64,
        r: u32,
    },
    Ellipse {
        cx: i64,
        cy: i64,
        rx: u32,
        ry: u32,
    },
}

impl Crop {
    pub fn apply(&self, src: &RasterImage) -> RasterImage {
        match *self {
            Crop::Rect {
                x,
                y,
                width,
                height,
            } => extract_rect(src, x, y, width, height),
            Crop::Circle { cx, cy, r } => extract_circle(src, cx, cy, r),
            Crop::Ellipse { cx, cy, rx, ry } => extract_ellipse(src, cx, cy, rx, ry),
        }
    }
}

/// Copy the pixel range [x, x+w) x [y, y+h) into a new `w` x `h` buffer.
pub fn extract_rect(src: &RasterImage, x: i64, y: i64, width: u32, height: u32) -> RasterImage {
    RasterImage::from_fn(width, height, |dx, dy| {
        source_pixel(src, x as i128 + dx as i128, y as i128 + dy as i128)
    })
}

/// Cut a circle of radius `r` centred on (cx, cy) into a `2r` x `2r` buffer.
///
/// Output pixel (r, r) is the source pixel at the centre.
pub fn extract_circle(src: &RasterImage, cx: i64, cy: i64, r: u32) -> RasterImage {
    let side = r.saturating_mul(2);
    let r = r as i128;
    let r2 = r * r;

    RasterImage::from_fn(side, side, |w, h| {
        let dx = w as i128 - r;
        let dy = h as i128 - r;
        if dx * dx + dy * dy <= r2 {
            source_pixel(src, cx as i128 + dx, cy as i128 + dy)
        } else {
            Colour::TRANSPARENT
        }
    })
}

/// Cut an axis-aligned ellipse with semi-axes `rx`, `ry` centred on (cx, cy)
/// into a `2rx` x `2ry` buffer.
///
/// Uses the two-focus definition: the foci sit on the major axis at
/// `sqrt(major^2 - minor^2)` from the centre, and a point is inside when the
/// sum of its distances to them is at most `2 * major`.
pub fn extract_ellipse(src: &RasterImage, cx: i64, cy: i64, rx: u32, ry: u32) -> RasterImage {
    let major = rx.max(ry) as f64;
    let minor = rx.min(ry) as f64;
    let f = (major * major - minor * minor).sqrt();

    // Foci relative to the centre.
    let (fx, fy) = if rx >= ry { (f, 0.0) } else { (0.0, f) };
    let foci = [(-fx, -fy), (fx, fy)];

    RasterImage::from_fn(rx.saturating_mul(2), ry.saturating_mul(2), |i, j| {
        let dx = i as i128 - rx as i128;
        let dy = j as i128 - ry as i128;
        let distance: f64 = foci
            .iter()
            .map(|&(x, y)| (dx as f64 - x).hypot(dy as f64 - y))
            .sum();
        if distance <= 2.0 * major + BOUNDARY_EPSILON {
            source_pixel(src, cx as i128 + dx, cy as i128 + dy)
        } else {
            Colour::TRANSPARENT
        }
    })
}

/// Source read at a widened coordinate; anything beyond `i64` is off the image.
fn source_pixel(src: &RasterImage, x: i128, y: i128) -> Colour {
    match (i64::try_from(x), i64::try_from(y)) {
        (Ok(x), Ok(y)) => src.get_or_transparent(x, y),
        _ => Colour::TRANSPARENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> RasterImage {
        RasterImage::from_fn(w, h, |x, y| Colour::rgb(x as u8, y as u8, 0))
    }

    #[test]
    fn test_rect_copies_half_open_range() {
        let src = gradient(10, 10);
        let out = extract_rect(&src, 2, 3, 4, 5);
        assert_eq!(out.size(), (4, 5));
        assert_eq!(out.get(0, 0), Some(Colour::rgb(2, 3, 0)));
        assert_eq!(out.get(3, 4), Some(Colour::rgb(5, 7, 0)));
    }

    #[test]
    fn test_rect_out_of_source_is_transparent() {
        let src = gradient(4, 4);
        let out = extract_rect(&src, 2, -1, 4, 2);
        assert_eq!(out.get(0, 0), Some(Colour::TRANSPARENT));
        assert_eq!(out.get(0, 1), Some(Colour::rgb(2, 0, 0)));
        assert_eq!(out.get(3, 1), Some(Colour::TRANSPARENT));
    }

    #[test]
    fn test_far_off_origin_reads_transparent() {
        let src = gradient(4, 4);
        let clear = |w, h| RasterImage::filled(w, h, Colour::TRANSPARENT);

        assert_eq!(extract_rect(&src, i64::MAX, 0, 2, 1), clear(2, 1));
        assert_eq!(extract_rect(&src, 0, i64::MAX - 1, 1, 3), clear(1, 3));
        assert_eq!(extract_circle(&src, i64::MAX, 0, 2), clear(4, 4));
        assert_eq!(extract_circle(&src, i64::MIN, i64::MIN, 2), clear(4, 4));
        assert_eq!(extract_ellipse(&src, i64::MAX, i64::MIN, 3, 2), clear(6, 4));
    }

    #[test]
    fn test_rect_zero_size_is_empty() {
        let out = extract_rect(&gradient(4, 4), 0, 0, 0, 3);
        assert!(out.is_empty());
        assert_eq!(out.size(), (0, 3));
    }

    #[test]
    fn test_circle_on_red_square() {
        let src = RasterImage::filled(1000, 1000, Colour::rgb(255, 0, 0));
        let out = extract_circle(&src, 500, 500, 300);
        assert_eq!(out.size(), (600, 600));
        assert_eq!(out.get(300, 300), src.get(500, 500));
        assert_eq!(out.get(300, 300), Some(Colour::rgb(255, 0, 0)));
        // Corners fall outside the circle.
        assert_eq!(out.get(0, 0), Some(Colour::TRANSPARENT));
        assert_eq!(out.get(599, 599), Some(Colour::TRANSPARENT));
        // Boundary point (r, 0) is inside.
        assert_eq!(out.get(300, 0), Some(Colour::rgb(255, 0, 0)));
    }

    #[test]
    fn test_circle_centre_maps_to_source_centre() {
        let src = gradient(50, 50);
        let out = extract_circle(&src, 20, 30, 5);
        assert_eq!(out.get(5, 5), Some(Colour::rgb(20, 30, 0)));
    }

    #[test]
    fn test_circle_zero_radius() {
        let out = extract_circle(&gradient(5, 5), 2, 2, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_ellipse_horizontal() {
        let src = RasterImage::filled(100, 100, Colour::WHITE);
        let out = extract_ellipse(&src, 50, 50, 20, 10);
        assert_eq!(out.size(), (40, 20));
        assert_eq!(out.get(20, 10), Some(Colour::WHITE));
        // Ends of the major axis are on the boundary.
        assert_eq!(out.get(0, 10), Some(Colour::WHITE));
        assert_eq!(out.get(20, 0), Some(Colour::WHITE));
        assert_eq!(out.get(0, 0), Some(Colour::TRANSPARENT));
        assert_eq!(out.get(2, 2), Some(Colour::TRANSPARENT));
    }

    #[test]
    fn test_ellipse_vertical() {
        let src = RasterImage::filled(100, 100, Colour::WHITE);
        let out = extract_ellipse(&src, 50, 50, 10, 20);
        assert_eq!(out.size(), (20, 40));
        assert_eq!(out.get(10, 0), Some(Colour::WHITE));
        assert_eq!(out.get(0, 20), Some(Colour::WHITE));
        assert_eq!(out.get(1, 1), Some(Colour::TRANSPARENT));
    }

    #[test]
    fn test_ellipse_with_equal_axes_matches_circle() {
        let src = gradient(60, 60);
        assert_eq!(
            extract_ellipse(&src, 30, 30, 12, 12),
            extract_circle(&src, 30, 30, 12)
        );
    }

    #[test]
    fn test_crop_dispatches_to_extractor() {
        let src = gradient(40, 40);
        let circle = Crop::Circle { cx: 20, cy: 20, r: 5 };
        assert_eq!(circle.apply(&src), extract_circle(&src, 20, 20, 5));

        let rect = Crop::Rect {
            x: 1,
            y: 2,
            width: 3,
            height: 4,
        };
        assert_eq!(rect.apply(&src).get(0, 0), Some(Colour::rgb(1, 2, 0)));
    }
}
