use bead_convert::{Bitmap, DetailBoost, Palette, PatternConverter, ResizeMode};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::config::DefaultsConfig;
use crate::error::ProcessError;

pub const DIMENSION_RANGE: RangeInclusive<usize> = 4..=80;
pub const MAX_COLORS_RANGE: RangeInclusive<usize> = 2..=12;

/// Conversion knobs of a processing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionSettings {
    pub target_width: usize,
    pub target_height: usize,
    pub max_colors: usize,
    #[serde(default)]
    pub detail_boost: DetailBoost,
    #[serde(default)]
    pub resize_mode: ResizeMode,
    #[serde(default)]
    pub use_palette_lock: bool,
    #[serde(default)]
    pub locked_palette: Option<Vec<String>>,
    #[serde(default)]
    pub enable_dithering: bool,
    #[serde(default)]
    pub auto_template_mode: bool,
}

impl ConversionSettings {
    pub fn from_defaults(defaults: &DefaultsConfig) -> Self {
        Self {
            target_width: defaults.target_width,
            target_height: defaults.target_height,
            max_colors: defaults.max_colors,
            detail_boost: defaults.detail_boost,
            resize_mode: defaults.resize_mode,
            use_palette_lock: false,
            locked_palette: None,
            enable_dithering: defaults.dithering,
            auto_template_mode: defaults.auto_template,
        }
    }

    /// Reject out-of-range knobs before any work starts.
    pub fn validate(&self) -> Result<(), ProcessError> {
        check_range("targetWidth", self.target_width, &DIMENSION_RANGE)?;
        check_range("targetHeight", self.target_height, &DIMENSION_RANGE)?;
        check_range("maxColors", self.max_colors, &MAX_COLORS_RANGE)?;

        if self.use_palette_lock {
            match &self.locked_palette {
                None => {
                    return Err(ProcessError::invalid(
                        "lockedPalette",
                        "required when usePaletteLock is set",
                    ))
                }
                Some(colors) if colors.is_empty() => {
                    return Err(ProcessError::invalid(
                        "lockedPalette",
                        "must contain at least one color",
                    ))
                }
                Some(colors) if colors.len() > bead_convert::palette::MAX_PALETTE_SIZE => {
                    return Err(ProcessError::invalid(
                        "lockedPalette",
                        format!(
                            "has {} colors (max {})",
                            colors.len(),
                            bead_convert::palette::MAX_PALETTE_SIZE
                        ),
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Build the core converter for these settings.
    ///
    /// The locked palette only applies when `use_palette_lock` is set.
    pub fn converter(&self) -> Result<PatternConverter, ProcessError> {
        let mut converter = PatternConverter::new(self.target_width, self.target_height)
            .max_colors(self.max_colors)
            .resize_mode(self.resize_mode)
            .detail_boost(self.detail_boost)
            .dithering(self.enable_dithering)
            .auto_template(self.auto_template_mode);

        if self.use_palette_lock {
            let colors = self.locked_palette.as_deref().unwrap_or_default();
            let palette = Palette::locked(colors)
                .map_err(|e| ProcessError::invalid("lockedPalette", e.to_string()))?;
            converter = converter.locked_palette(palette);
        }

        Ok(converter)
    }
}

fn check_range(
    field: &'static str,
    value: usize,
    range: &RangeInclusive<usize>,
) -> Result<(), ProcessError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ProcessError::invalid(
            field,
            format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        ))
    }
}

/// A source bitmap plus the settings to convert it with.
///
/// Owned end to end: the worker strategy moves it onto the blocking pool.
#[derive(Debug, Clone)]
pub struct ProcessingRequest {
    pub source_bitmap: Bitmap,
    pub settings: ConversionSettings,
}

impl ProcessingRequest {
    pub fn new(source_bitmap: Bitmap, settings: ConversionSettings) -> Self {
        Self {
            source_bitmap,
            settings,
        }
    }

    pub fn validate(&self) -> Result<(), ProcessError> {
        self.settings.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings() -> ConversionSettings {
        ConversionSettings::from_defaults(&DefaultsConfig::default())
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(settings().validate(), Ok(()));
    }

    #[test]
    fn test_dimension_bounds() {
        for (w, h, ok) in [(4, 4, true), (80, 80, true), (3, 10, false), (10, 81, false)] {
            let s = ConversionSettings {
                target_width: w,
                target_height: h,
                ..settings()
            };
            assert_eq!(s.validate().is_ok(), ok, "{w}x{h}");
        }
    }

    #[test]
    fn test_max_colors_bounds() {
        let too_few = ConversionSettings {
            max_colors: 1,
            ..settings()
        };
        assert_eq!(
            too_few.validate(),
            Err(ProcessError::invalid(
                "maxColors",
                "must be between 2 and 12, got 1"
            ))
        );

        let too_many = ConversionSettings {
            max_colors: 13,
            ..settings()
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_lock_requires_palette() {
        let missing = ConversionSettings {
            use_palette_lock: true,
            ..settings()
        };
        assert!(matches!(
            missing.validate(),
            Err(ProcessError::InvalidRequest {
                field: "lockedPalette",
                ..
            })
        ));

        let empty = ConversionSettings {
            use_palette_lock: true,
            locked_palette: Some(Vec::new()),
            ..settings()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_oversized_lock_rejected() {
        let s = ConversionSettings {
            use_palette_lock: true,
            locked_palette: Some(vec!["#000000".to_string(); 257]),
            ..settings()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_unlocked_palette_ignored() {
        // A palette without the lock flag is neither validated nor used.
        let s = ConversionSettings {
            locked_palette: Some(Vec::new()),
            ..settings()
        };
        assert_eq!(s.validate(), Ok(()));
        assert!(s.converter().is_ok());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r##"{
            "targetWidth": 20,
            "targetHeight": 10,
            "maxColors": 4,
            "detailBoost": 2,
            "resizeMode": "subjectCenteredCrop",
            "usePaletteLock": true,
            "lockedPalette": ["#FF0000", "#00ff00"],
            "enableDithering": true,
            "autoTemplateMode": false
        }"##;

        let s: ConversionSettings = serde_json::from_str(json).unwrap();
        assert_eq!(s.target_width, 20);
        assert_eq!(s.detail_boost, DetailBoost::Sharpen);
        assert_eq!(s.resize_mode, ResizeMode::SubjectCenteredCrop);
        assert_eq!(
            s.locked_palette,
            Some(vec!["#FF0000".to_string(), "#00ff00".to_string()])
        );
        assert!(s.enable_dithering);
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn test_deserialize_rejects_bad_detail_boost() {
        let json = r#"{"targetWidth": 8, "targetHeight": 8, "maxColors": 4, "detailBoost": 3}"#;
        assert!(serde_json::from_str::<ConversionSettings>(json).is_err());
    }
}
