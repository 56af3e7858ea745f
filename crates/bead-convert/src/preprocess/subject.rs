//! Edge-based subject detection for subject-centered cropping.

use crate::bitmap::Bitmap;

/// Gradient magnitude a pixel must exceed to count as an edge.
pub const EDGE_THRESHOLD: u32 = 30;

/// Padding added around the detected box, as a fraction of the shorter side.
pub const SUBJECT_PADDING: f64 = 0.05;

/// An axis-aligned box in source-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Bounds {
    /// The whole bitmap.
    pub fn full(bitmap: &Bitmap) -> Self {
        Self {
            x: 0,
            y: 0,
            width: bitmap.width(),
            height: bitmap.height(),
        }
    }
}

/// Locate the region of highest local contrast.
///
/// Runs 3x3 Sobel kernels over the red channel of every interior pixel
/// and boxes the pixels whose magnitude (capped at 255) exceeds
/// [`EDGE_THRESHOLD`]. The box is padded by 5% of the shorter side and
/// clamped to the bitmap.
///
/// When nothing crosses the threshold, including bitmaps too small to have
/// an interior, the full frame is returned.
pub fn detect_bounds(bitmap: &Bitmap) -> Bounds {
    let (w, h) = (bitmap.width(), bitmap.height());
    if w < 3 || h < 3 {
        return Bounds::full(bitmap);
    }

    let red = |x: usize, y: usize| i32::from(bitmap.get(x, y).r);
    let mut found: Option<(usize, usize, usize, usize)> = None;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let gx = -red(x - 1, y - 1) - 2 * red(x - 1, y) - red(x - 1, y + 1)
                + red(x + 1, y - 1)
                + 2 * red(x + 1, y)
                + red(x + 1, y + 1);
            let gy = -red(x - 1, y - 1) - 2 * red(x, y - 1) - red(x + 1, y - 1)
                + red(x - 1, y + 1)
                + 2 * red(x, y + 1)
                + red(x + 1, y + 1);

            let magnitude = (f64::from(gx * gx + gy * gy)).sqrt().min(255.0);
            if magnitude <= f64::from(EDGE_THRESHOLD) {
                continue;
            }

            found = Some(match found {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }

    let Some((min_x, min_y, max_x, max_y)) = found else {
        return Bounds::full(bitmap);
    };

    let pad = (SUBJECT_PADDING * w.min(h) as f64).floor() as usize;
    let x0 = min_x.saturating_sub(pad);
    let y0 = min_y.saturating_sub(pad);
    let x1 = (max_x + pad).min(w - 1);
    let y1 = (max_y + pad).min(h - 1);

    Bounds {
        x: x0,
        y: y0,
        width: x1 - x0 + 1,
        height: y1 - y0 + 1,
    }
}
