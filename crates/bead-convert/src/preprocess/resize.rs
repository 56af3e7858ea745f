//! Resampling a source bitmap down to the pattern grid.
//!
//! Three framing policies decide which part of the source is used, then
//! each destination pixel is sampled at its mapped fractional coordinate,
//! either bilinearly or with a 3x3 sharpening kernel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::subject::detect_bounds;
use crate::bitmap::Bitmap;
use crate::color::{clamp_channel, Rgba};

/// Framing policy for mapping the source onto the target grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeMode {
    /// Keep the whole image; one output dimension shrinks to keep the
    /// source aspect ratio.
    Fit,
    /// Center-crop to the target aspect ratio; output is exactly the
    /// target size.
    #[default]
    Fill,
    /// Crop to the detected subject, then scale to the target size.
    SubjectCenteredCrop,
}

/// Error returned when parsing an unknown [`ResizeMode`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resize mode '{0}' (expected fit, fill or subjectCenteredCrop)")]
pub struct ParseResizeModeError(pub String);

impl FromStr for ResizeMode {
    type Err = ParseResizeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fit" => Ok(ResizeMode::Fit),
            "fill" => Ok(ResizeMode::Fill),
            "subjectCenteredCrop" | "subject" => Ok(ResizeMode::SubjectCenteredCrop),
            other => Err(ParseResizeModeError(other.to_string())),
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResizeMode::Fit => "fit",
            ResizeMode::Fill => "fill",
            ResizeMode::SubjectCenteredCrop => "subjectCenteredCrop",
        })
    }
}

/// Detail level requested by the caller.
///
/// Serialized as its integer level. Only [`DetailBoost::Sharpen`] changes
/// the sampler; [`DetailBoost::Eligible`] samples like `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DetailBoost {
    #[default]
    Normal,
    Eligible,
    Sharpen,
}

impl DetailBoost {
    #[inline]
    pub fn sharpens(self) -> bool {
        self == DetailBoost::Sharpen
    }
}

/// Error returned for a detail level outside `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("detail boost must be 0, 1 or 2 (got {0})")]
pub struct InvalidDetailBoost(pub u8);

impl TryFrom<u8> for DetailBoost {
    type Error = InvalidDetailBoost;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(DetailBoost::Normal),
            1 => Ok(DetailBoost::Eligible),
            2 => Ok(DetailBoost::Sharpen),
            other => Err(InvalidDetailBoost(other)),
        }
    }
}

impl From<DetailBoost> for u8 {
    fn from(detail: DetailBoost) -> u8 {
        match detail {
            DetailBoost::Normal => 0,
            DetailBoost::Eligible => 1,
            DetailBoost::Sharpen => 2,
        }
    }
}

/// Source region to sample, in fractional pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Crop {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Resample `bitmap` to the target grid.
///
/// `Fill` and `SubjectCenteredCrop` always return exactly
/// `target_width x target_height`. `Fit` keeps the source aspect ratio, so
/// one side may come out smaller (never below 1).
pub fn resize(
    bitmap: &Bitmap,
    target_width: usize,
    target_height: usize,
    mode: ResizeMode,
    detail: DetailBoost,
) -> Bitmap {
    let target_width = target_width.max(1);
    let target_height = target_height.max(1);
    let (dest_width, dest_height, crop) = plan(bitmap, target_width, target_height, mode);

    let scale_x = crop.width / dest_width as f64;
    let scale_y = crop.height / dest_height as f64;
    let max_x = (bitmap.width() - 1) as f64;
    let max_y = (bitmap.height() - 1) as f64;

    let mut pixels = Vec::with_capacity(dest_width * dest_height);
    for dy in 0..dest_height {
        let sy = (crop.y + (dy as f64 + 0.5) * scale_y - 0.5).clamp(0.0, max_y);
        for dx in 0..dest_width {
            let sx = (crop.x + (dx as f64 + 0.5) * scale_x - 0.5).clamp(0.0, max_x);
            let pixel = if detail.sharpens() {
                sample_sharpened(bitmap, sx, sy)
            } else {
                sample_bilinear(bitmap, sx, sy)
            };
            pixels.push(pixel);
        }
    }

    Bitmap::from_parts(dest_width, dest_height, pixels)
}

fn plan(
    bitmap: &Bitmap,
    target_width: usize,
    target_height: usize,
    mode: ResizeMode,
) -> (usize, usize, Crop) {
    let sw = bitmap.width() as f64;
    let sh = bitmap.height() as f64;
    let full = Crop {
        x: 0.0,
        y: 0.0,
        width: sw,
        height: sh,
    };
    let source_aspect = sw / sh;
    let target_aspect = target_width as f64 / target_height as f64;

    match mode {
        ResizeMode::Fit => {
            let (w, h) = if source_aspect > target_aspect {
                let h = (target_width as f64 / source_aspect).round() as usize;
                (target_width, h.clamp(1, target_height))
            } else {
                let w = (target_height as f64 * source_aspect).round() as usize;
                (w.clamp(1, target_width), target_height)
            };
            (w, h, full)
        }
        ResizeMode::Fill => {
            let crop = if source_aspect > target_aspect {
                let width = (sh * target_aspect).max(1.0);
                Crop {
                    x: (sw - width) / 2.0,
                    width,
                    ..full
                }
            } else {
                let height = (sw / target_aspect).max(1.0);
                Crop {
                    y: (sh - height) / 2.0,
                    height,
                    ..full
                }
            };
            (target_width, target_height, crop)
        }
        ResizeMode::SubjectCenteredCrop => {
            let bounds = detect_bounds(bitmap);
            let crop = Crop {
                x: bounds.x as f64,
                y: bounds.y as f64,
                width: bounds.width.max(1) as f64,
                height: bounds.height.max(1) as f64,
            };
            (target_width, target_height, crop)
        }
    }
}

fn sample_bilinear(bitmap: &Bitmap, sx: f64, sy: f64) -> Rgba {
    let x0 = sx.floor() as usize;
    let y0 = sy.floor() as usize;
    let x1 = (x0 + 1).min(bitmap.width() - 1);
    let y1 = (y0 + 1).min(bitmap.height() - 1);
    let fx = (sx - x0 as f64) as f32;
    let fy = (sy - y0 as f64) as f32;

    let p00 = channels(bitmap.get(x0, y0));
    let p10 = channels(bitmap.get(x1, y0));
    let p01 = channels(bitmap.get(x0, y1));
    let p11 = channels(bitmap.get(x1, y1));

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] + (p10[c] - p00[c]) * fx;
        let bottom = p01[c] + (p11[c] - p01[c]) * fx;
        out[c] = clamp_channel(top + (bottom - top) * fy);
    }
    Rgba::new(out[0], out[1], out[2], out[3])
}

/// 3x3 sharpen (center 5, orthogonal -1, corners 0) around the nearest
/// source pixel. Alpha is the plain mean of the five taps.
fn sample_sharpened(bitmap: &Bitmap, sx: f64, sy: f64) -> Rgba {
    let cx = sx.round() as isize;
    let cy = sy.round() as isize;

    let center = channels(bitmap.get_clamped(cx, cy));
    let taps = [
        channels(bitmap.get_clamped(cx, cy - 1)),
        channels(bitmap.get_clamped(cx - 1, cy)),
        channels(bitmap.get_clamped(cx + 1, cy)),
        channels(bitmap.get_clamped(cx, cy + 1)),
    ];

    let mut out = [0u8; 4];
    for c in 0..3 {
        let neighbors: f32 = taps.iter().map(|t| t[c]).sum();
        out[c] = clamp_channel(5.0 * center[c] - neighbors);
    }
    let alpha_sum: f32 = center[3] + taps.iter().map(|t| t[3]).sum::<f32>();
    out[3] = clamp_channel(alpha_sum / 5.0);

    Rgba::new(out[0], out[1], out[2], out[3])
}

#[inline]
fn channels(p: Rgba) -> [f32; 4] {
    [p.r as f32, p.g as f32, p.b as f32, p.a as f32]
}
