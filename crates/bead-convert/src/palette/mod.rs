//! Palette types and utilities
//!
//! This module provides the ordered [`Palette`] that every pixel grid
//! indexes into, plus the error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::Palette;

/// Largest palette a grid can index with one byte per cell.
pub const MAX_PALETTE_SIZE: usize = 256;
