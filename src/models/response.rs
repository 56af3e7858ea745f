use bead_convert::{Pattern, Stage};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::time::Duration;

/// Glyphs used for palette entries in the text rendering, in palette order.
const SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const OVERFLOW_SYMBOL: char = '#';
const EMPTY_SYMBOL: char = '.';

/// Successful conversion, in the shape handed to grid-painting clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingResult {
    /// Rows of palette labels, `null` for transparent cells
    pub pixel_data: Vec<Vec<Option<String>>>,
    pub width: usize,
    pub height: usize,
    pub palette: Vec<String>,
    pub stats: ProcessingStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    pub original_color_count: usize,
    pub final_color_count: usize,
    pub processing_time_ms: u64,
}

impl ProcessingResult {
    pub fn from_pattern(pattern: &Pattern, elapsed: Duration) -> Self {
        let palette = pattern.palette_hex();
        Self {
            pixel_data: pattern.hex_rows(),
            width: pattern.grid.width(),
            height: pattern.grid.height(),
            stats: ProcessingStats {
                original_color_count: pattern.original_color_count,
                final_color_count: palette.len(),
                processing_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            },
            palette,
        }
    }

    /// Plain-text chart: a legend line per palette entry, then the grid.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for (i, label) in self.palette.iter().enumerate() {
            let _ = writeln!(out, "{} {label}", symbol(i));
        }
        out.push('\n');

        for row in &self.pixel_data {
            for cell in row {
                let glyph = match cell {
                    Some(label) => self
                        .palette
                        .iter()
                        .position(|p| p == label)
                        .map_or(OVERFLOW_SYMBOL, symbol),
                    None => EMPTY_SYMBOL,
                };
                out.push(glyph);
            }
            out.push('\n');
        }

        out
    }
}

fn symbol(index: usize) -> char {
    SYMBOLS
        .get(index)
        .map_or(OVERFLOW_SYMBOL, |&b| char::from(b))
}

/// A pipeline checkpoint forwarded by the worker strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub percent: u8,
}

impl From<Stage> for ProgressEvent {
    fn from(stage: Stage) -> Self {
        Self {
            stage,
            percent: stage.percent(),
        }
    }
}
