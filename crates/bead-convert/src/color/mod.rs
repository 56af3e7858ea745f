//! Color types and color math.
//!
//! All arithmetic here happens directly on 8-bit sRGB values. Pattern
//! palettes are small and user-facing, so the same plain Euclidean RGB
//! metric is used for quantization, nearest-color mapping and dithering.
//!
//! # Example
//!
//! ```
//! use bead_convert::color::{distance, hex_to_rgb, rgb_to_hex, Rgb};
//!
//! let red = hex_to_rgb("#FF0000");
//! assert_eq!(red, Rgb::new(255, 0, 0));
//! assert_eq!(rgb_to_hex(red.r, red.g, red.b), "#ff0000");
//! assert_eq!(distance(red, red), 0.0);
//! ```

mod hsl;
mod rgb;

pub use hsl::{hex_to_hsl, hsl_to_hex, Hsl};
pub use rgb::{
    clamp_channel, distance, distance_sq, hex_to_rgb, rgb_to_hex, Channel, Rgb, Rgba,
    OPAQUE_THRESHOLD,
};
