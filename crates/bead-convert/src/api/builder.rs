//! PatternConverter builder, the primary entry point for the crate.
//!
//! [`PatternConverter`] sequences resize, optional enhancement,
//! quantization and mapping, and reports each completed [`Stage`].

use serde::Serialize;

use super::error::ConvertError;
use crate::bitmap::Bitmap;
use crate::dither::{dither_map, nearest_map};
use crate::output::{Pattern, PixelGrid};
use crate::palette::Palette;
use crate::preprocess::{auto_template, resize, DetailBoost, ResizeMode};
use crate::quantize::{distinct_colors, quantize};

/// Pipeline checkpoints, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Started,
    Resized,
    /// Only reported when auto-template enhancement runs.
    Enhanced,
    Quantized,
    Finished,
}

impl Stage {
    /// Percent-complete equivalent of this checkpoint.
    pub fn percent(self) -> u8 {
        match self {
            Stage::Started => 0,
            Stage::Resized => 25,
            Stage::Enhanced => 50,
            Stage::Quantized => 90,
            Stage::Finished => 100,
        }
    }
}

/// Image-to-pattern converter.
///
/// - Constructor takes the target grid size; everything else has a default
///   (6 colors, fill framing, no detail boost, no dithering, no enhancement)
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one converter can be
///   reused across images
///
/// # Example
///
/// ```
/// use bead_convert::{Bitmap, PatternConverter, ResizeMode, Rgb, Rgba};
///
/// let red = Rgba::opaque(Rgb::new(255, 0, 0));
/// let blue = Rgba::opaque(Rgb::new(0, 0, 255));
/// let source = Bitmap::new(2, 2, vec![red, red, blue, blue]).unwrap();
///
/// let pattern = PatternConverter::new(2, 2)
///     .max_colors(2)
///     .resize_mode(ResizeMode::Fill)
///     .convert(&source)
///     .unwrap();
///
/// assert_eq!(pattern.palette_hex(), vec!["#ff0000", "#0000ff"]);
/// assert_eq!(pattern.grid.get(0, 1), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct PatternConverter {
    target_width: usize,
    target_height: usize,
    max_colors: usize,
    mode: ResizeMode,
    detail: DetailBoost,
    dithering: bool,
    auto_template: bool,
    locked: Option<Palette>,
}

impl PatternConverter {
    /// Create a converter for a `target_width x target_height` grid.
    pub fn new(target_width: usize, target_height: usize) -> Self {
        Self {
            target_width,
            target_height,
            max_colors: 6,
            mode: ResizeMode::default(),
            detail: DetailBoost::default(),
            dithering: false,
            auto_template: false,
            locked: None,
        }
    }

    /// Upper bound on computed palette size.
    #[inline]
    pub fn max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors;
        self
    }

    #[inline]
    pub fn resize_mode(mut self, mode: ResizeMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn detail_boost(mut self, detail: DetailBoost) -> Self {
        self.detail = detail;
        self
    }

    /// Use Floyd-Steinberg error diffusion instead of nearest mapping.
    #[inline]
    pub fn dithering(mut self, enabled: bool) -> Self {
        self.dithering = enabled;
        self
    }

    /// Run the green/brown stylization pass before quantizing.
    #[inline]
    pub fn auto_template(mut self, enabled: bool) -> Self {
        self.auto_template = enabled;
        self
    }

    /// Skip quantization and map onto this palette as given.
    #[inline]
    pub fn locked_palette(mut self, palette: Palette) -> Self {
        self.locked = Some(palette);
        self
    }

    /// Convert without progress reporting.
    pub fn convert(&self, bitmap: &Bitmap) -> Result<Pattern, ConvertError> {
        self.convert_with_progress(bitmap, |_| {})
    }

    /// Convert, calling `progress` after each completed stage.
    ///
    /// Stages arrive in increasing [`Stage::percent`] order.
    /// [`Stage::Enhanced`] is skipped unless enhancement is on.
    ///
    /// A source with no opaque pixels after resizing produces an
    /// all-transparent grid. Its palette is the locked one if set,
    /// otherwise `None`.
    pub fn convert_with_progress(
        &self,
        bitmap: &Bitmap,
        mut progress: impl FnMut(Stage),
    ) -> Result<Pattern, ConvertError> {
        progress(Stage::Started);

        let mut resized = resize(
            bitmap,
            self.target_width,
            self.target_height,
            self.mode,
            self.detail,
        );
        progress(Stage::Resized);

        let original_color_count = distinct_colors(&resized.opaque_colors());

        if self.auto_template {
            auto_template(&mut resized);
            progress(Stage::Enhanced);
        }

        let palette = match &self.locked {
            Some(locked) => Some(locked.clone()),
            None => {
                let colors = quantize(&resized.opaque_colors(), self.max_colors);
                if colors.is_empty() {
                    None
                } else {
                    Some(Palette::from_colors(&colors)?)
                }
            }
        };
        progress(Stage::Quantized);

        let grid = match &palette {
            Some(palette) if self.dithering => dither_map(&resized, palette),
            Some(palette) => nearest_map(&resized, palette),
            None => PixelGrid::new(
                resized.width(),
                resized.height(),
                vec![None; resized.width() * resized.height()],
            ),
        };
        progress(Stage::Finished);

        Ok(Pattern {
            grid,
            palette,
            original_color_count,
        })
    }
}
