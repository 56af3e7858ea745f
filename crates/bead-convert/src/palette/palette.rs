//! Ordered pattern palette with nearest-color matching.

use std::collections::HashSet;

use super::error::PaletteError;
use super::MAX_PALETTE_SIZE;
use crate::color::{distance_sq, hex_to_rgb, Rgb};

/// An ordered palette of pattern colors.
///
/// Each entry carries the label collaborators use to refer to it and the
/// color used for matching. Computed palettes label entries with their
/// canonical hex form and never hold duplicates. Locked palettes keep the
/// caller's strings exactly as given, order and case included, and are not
/// checked for duplicates.
///
/// # Example
///
/// ```
/// use bead_convert::{Palette, Rgb};
///
/// let palette = Palette::from_colors(&[Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]).unwrap();
/// assert_eq!(palette.len(), 2);
///
/// let (index, dist) = palette.find_nearest([250.0, 10.0, 0.0]);
/// assert_eq!(index, 0);
/// assert!(dist > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    labels: Vec<String>,
    colors: Vec<Rgb>,
    // Matching happens against float accumulators, so convert once here.
    colors_f32: Vec<[f32; 3]>,
}

impl Palette {
    /// Build a palette from computed colors, dropping repeats.
    ///
    /// # Errors
    ///
    /// [`PaletteError::Empty`] for no colors, [`PaletteError::TooLarge`]
    /// for more than 256 distinct colors.
    pub fn from_colors(colors: &[Rgb]) -> Result<Self, PaletteError> {
        let mut seen = HashSet::new();
        let unique: Vec<Rgb> = colors.iter().copied().filter(|c| seen.insert(*c)).collect();
        let labels = unique.iter().map(|c| c.to_hex()).collect();
        Self::build(labels, unique)
    }

    /// Build a caller-supplied locked palette.
    ///
    /// Strings are kept verbatim and become the output palette as-is.
    /// Malformed entries match as white, as with [`hex_to_rgb`].
    ///
    /// # Errors
    ///
    /// [`PaletteError::Empty`] or [`PaletteError::TooLarge`].
    pub fn locked<S: AsRef<str>>(hexes: &[S]) -> Result<Self, PaletteError> {
        let labels: Vec<String> = hexes.iter().map(|h| h.as_ref().to_string()).collect();
        let colors = labels.iter().map(|h| hex_to_rgb(h)).collect();
        Self::build(labels, colors)
    }

    fn build(labels: Vec<String>, colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(PaletteError::TooLarge(colors.len()));
        }

        let colors_f32 = colors.iter().map(|c| c.to_f32()).collect();
        Ok(Self {
            labels,
            colors,
            colors_f32,
        })
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color of entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn color(&self, index: usize) -> Rgb {
        self.colors[index]
    }

    /// Label (hex string) of entry `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn hex(&self, index: usize) -> &str {
        &self.labels[index]
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Find the entry closest to a (possibly fractional) RGB value.
    ///
    /// Returns the index and the squared Euclidean distance. Ties go to the
    /// lowest index so results are reproducible.
    pub fn find_nearest(&self, pixel: [f32; 3]) -> (usize, f32) {
        let mut best_idx = 0;
        let mut best_dist = f32::INFINITY;

        for (i, &candidate) in self.colors_f32.iter().enumerate() {
            let dist = distance_sq(pixel, candidate);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx, best_dist)
    }

    /// Nearest entry to an exact color.
    #[inline]
    pub fn nearest(&self, color: Rgb) -> usize {
        self.find_nearest(color.to_f32()).0
    }
}
