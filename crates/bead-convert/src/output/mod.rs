//! Output types for the conversion pipeline.
//!
//! [`PixelGrid`] holds one optional palette index per cell; [`Pattern`]
//! bundles it with the palette and the color statistics collaborators
//! display.

mod pixel_grid;

pub use pixel_grid::{Pattern, PixelGrid};
