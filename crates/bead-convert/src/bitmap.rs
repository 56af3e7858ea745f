//! Source and resampled RGBA pixel fields.

use crate::api::ConvertError;
use crate::color::{Rgb, Rgba};

/// A rectangular, row-major field of RGBA pixels.
///
/// Dimensions are never zero and `pixels.len() == width * height` always
/// holds; both are checked on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Bitmap {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidBitmap`] if a dimension is zero or the buffer
    /// length does not match.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self, ConvertError> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(ConvertError::InvalidBitmap {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Assemble a bitmap whose invariants the caller already upholds.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Rgba>) -> Self {
        debug_assert!(width > 0 && height > 0 && pixels.len() == width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build from a flat `[R, G, B, A, ...]` buffer.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidBitmap`] if the byte count is not
    /// `width * height * 4` or a dimension is zero.
    pub fn from_rgba_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ConvertError> {
        if bytes.len() % 4 != 0 {
            return Err(ConvertError::InvalidBitmap {
                width,
                height,
                len: bytes.len() / 4,
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A bitmap filled with one color.
    ///
    /// Zero dimensions are bumped to 1.
    pub fn solid(width: usize, height: usize, pixel: Rgba) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.width + x]
    }

    /// Pixel at a signed coordinate, clamped to the nearest edge.
    #[inline]
    pub(crate) fn get_clamped(&self, x: isize, y: isize) -> Rgba {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.get(x, y)
    }

    /// Colors of all opaque pixels in raster order, repeats included.
    pub fn opaque_colors(&self) -> Vec<Rgb> {
        self.pixels
            .iter()
            .filter(|p| p.is_opaque())
            .map(|p| p.rgb())
            .collect()
    }

    /// Apply a per-pixel transform in place.
    pub(crate) fn map_pixels(&mut self, f: impl Fn(Rgba) -> Rgba) {
        for pixel in &mut self.pixels {
            *pixel = f(*pixel);
        }
    }

    /// Flat `[R, G, B, A, ...]` bytes.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .collect()
    }
}
