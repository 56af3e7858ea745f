//! Mapping resampled pixels onto a palette.
//!
//! Two interchangeable mappers produce a [`PixelGrid`](crate::PixelGrid):
//!
//! - [`nearest_map`]: each opaque pixel independently takes its nearest
//!   palette entry.
//! - [`dither_map`]: Floyd-Steinberg error diffusion in raster order.
//!
//! Both use the plain Euclidean RGB distance from
//! [`Palette::find_nearest`](crate::Palette::find_nearest), the same metric
//! the quantizer's output is judged by.

mod floyd_steinberg;
mod kernel;
mod nearest;

pub use floyd_steinberg::{dither_map, dither_with_kernel};
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use nearest::nearest_map;
