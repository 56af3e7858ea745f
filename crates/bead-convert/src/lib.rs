#![allow(clippy::module_inception)]

//! bead-convert: photographs to bead and stitch patterns
//!
//! This library turns an RGBA bitmap into a small grid of palette
//! references: the image is resampled to the pattern size, reduced to a
//! handful of colors with median cut (or mapped onto a fixed palette), and
//! optionally dithered.
//!
//! # Quick Start
//!
//! The [`PatternConverter`] builder is the primary entry point:
//!
//! ```
//! use bead_convert::{Bitmap, PatternConverter, Rgb, Rgba};
//!
//! let source = Bitmap::solid(40, 30, Rgba::opaque(Rgb::new(200, 40, 40)));
//! let pattern = PatternConverter::new(8, 8).max_colors(4).convert(&source).unwrap();
//!
//! assert_eq!(pattern.grid.width(), 8);
//! assert_eq!(pattern.palette_hex(), vec!["#c82828"]);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Bitmap (any size, RGBA)
//!     |
//!     v
//! resize            fit / fill / subjectCenteredCrop,
//!     |             bilinear or 3x3 sharpen
//!     v
//! [auto_template]   optional green/brown hue shift
//!     |
//!     v
//! quantize          median cut over opaque pixels
//!     |             (or a locked palette, used as-is)
//!     v
//! nearest_map / dither_map
//!     |
//!     v
//! Pattern { PixelGrid, Palette, original_color_count }
//! ```
//!
//! # Transparency
//!
//! A pixel with alpha below 128 is transparent everywhere: it is not part
//! of the quantizer's population, it neither receives nor emits dithering
//! error, and its grid cell is `None`.
//!
//! # Color Distance
//!
//! Every nearest-color decision uses plain Euclidean distance on 8-bit sRGB
//! channels. Bead palettes are tiny and picked by eye, so the quantizer and
//! the mappers share this one metric rather than a perceptual space.

pub mod api;
pub mod bitmap;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod preprocess;
pub mod quantize;


pub use api::{ConvertError, PatternConverter, Stage};
pub use bitmap::Bitmap;
pub use color::{Rgb, Rgba};
pub use output::{Pattern, PixelGrid};
pub use palette::{Palette, PaletteError, ParseColorError};
pub use preprocess::{DetailBoost, ResizeMode};
