//! Preprocessing: everything that happens before palette reduction.
//!
//! 1. **Resize** to the pattern grid under a framing policy
//!    ([`ResizeMode`]), sampling bilinearly or sharpened ([`DetailBoost`]).
//!    Subject-centered framing uses [`detect_bounds`].
//! 2. **Auto-template enhancement** ([`auto_template`]), only on request.
//!
//! # Example
//!
//! ```
//! use bead_convert::color::{Rgb, Rgba};
//! use bead_convert::preprocess::{resize, DetailBoost, ResizeMode};
//! use bead_convert::Bitmap;
//!
//! let source = Bitmap::solid(64, 32, Rgba::opaque(Rgb::new(40, 120, 200)));
//! let grid = resize(&source, 16, 16, ResizeMode::Fit, DetailBoost::Normal);
//!
//! assert_eq!((grid.width(), grid.height()), (16, 8));
//! ```

mod enhance;
mod resize;
mod subject;

pub use enhance::{auto_template, enhance_pixel};
pub use resize::{resize, DetailBoost, InvalidDetailBoost, ParseResizeModeError, ResizeMode};
pub use subject::{detect_bounds, Bounds, EDGE_THRESHOLD, SUBJECT_PADDING};
