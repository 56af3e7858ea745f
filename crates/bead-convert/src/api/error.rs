//! Unified error type for the bead-convert public API.

use thiserror::Error;

use crate::palette::PaletteError;

/// Unified error type for the bead-convert public API.
///
/// # Example
///
/// ```
/// use bead_convert::{Bitmap, ConvertError, Rgba};
///
/// fn one_pixel() -> Result<Bitmap, ConvertError> {
///     Bitmap::new(1, 1, vec![Rgba::TRANSPARENT])
/// }
/// # assert!(one_pixel().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Pixel buffer does not describe a non-empty `width x height` field
    #[error("invalid bitmap: {width}x{height} with {len} pixels")]
    InvalidBitmap {
        width: usize,
        height: usize,
        len: usize,
    },
    /// Palette validation error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
}
