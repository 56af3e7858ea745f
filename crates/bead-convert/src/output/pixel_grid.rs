//! PixelGrid and Pattern: the paintable result of a conversion.

use crate::palette::Palette;

/// A rectangular field of palette references.
///
/// Each cell holds either `None` (transparent, left unpainted) or an index
/// into the palette the grid was produced with. Row-major order.
///
/// # Example
///
/// ```
/// use bead_convert::{Palette, PixelGrid, Rgb};
///
/// let palette = Palette::from_colors(&[Rgb::new(255, 0, 0)]).unwrap();
/// let grid = PixelGrid::new(2, 1, vec![Some(0), None]);
///
/// assert_eq!(grid.get(0, 0), Some(0));
/// assert_eq!(
///     grid.to_hex_rows(&palette),
///     vec![vec![Some("#ff0000".to_string()), None]]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<u8>>,
}

impl PixelGrid {
    /// Create a grid from row-major cells.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `cells.len() == width * height`.
    pub fn new(width: usize, height: usize, cells: Vec<Option<u8>>) -> Self {
        debug_assert_eq!(
            cells.len(),
            width * height,
            "cells length ({}) must match width * height ({}x{})",
            cells.len(),
            width,
            height,
        );
        Self {
            width,
            height,
            cells,
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
    pub fn cells(&self) -> &[Option<u8>] {
        &self.cells
    }

    /// Cell at `(x, y)`, or `None` when out of bounds or transparent.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<u8>]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Number of painted (non-transparent) cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Resolve every cell to its palette label.
    pub fn to_hex_rows(&self, palette: &Palette) -> Vec<Vec<Option<String>>> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map(|idx| palette.hex(idx as usize).to_string()))
                    .collect()
            })
            .collect()
    }
}

/// A converted pattern: grid, the palette it indexes, and color statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub grid: PixelGrid,
    /// Computed or locked palette. `None` only when the resized image has
    /// no opaque pixels and no palette was locked.
    pub palette: Option<Palette>,
    /// Distinct opaque colors in the resized bitmap, before enhancement.
    pub original_color_count: usize,
}

impl Pattern {
    /// Palette labels in order, empty when there is no palette.
    pub fn palette_hex(&self) -> Vec<String> {
        self.palette
            .as_ref()
            .map(|p| p.labels().to_vec())
            .unwrap_or_default()
    }

    /// Grid cells resolved to labels.
    pub fn hex_rows(&self) -> Vec<Vec<Option<String>>> {
        match &self.palette {
            Some(palette) => self.grid.to_hex_rows(palette),
            None => vec![vec![None; self.grid.width()]; self.grid.height()],
        }
    }
}
