//! 8-bit RGB and RGBA color types.
//!
//! `#rrggbb` lowercase hex is the canonical identity of a color: palettes,
//! pixel grids and every collaborator outside this crate key colors by it.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// Alpha at or above this value is opaque; anything below is transparent
/// and never receives a color.
pub const OPAQUE_THRESHOLD: u8 = 128;

/// One of the three color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in tie-break priority order (R > G > B).
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical `#rrggbb` form.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    #[inline]
    pub fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Channels as floats, for accumulators that carry fractional error.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Round and clamp float channels back into a color.
    #[inline]
    pub fn from_f32(values: [f32; 3]) -> Self {
        Self::new(
            clamp_channel(values[0]),
            clamp_channel(values[1]),
            clamp_channel(values[2]),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Strict `#rrggbb` parser (leading `#` optional, case-insensitive).
    ///
    /// Use [`hex_to_rgb`] where malformed input must degrade to white
    /// instead of failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if digits.len() != 6 {
            return Err(ParseColorError::InvalidLength(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(digits.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ParseColorError::InvalidHex(digits.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// An sRGB color with 8-bit alpha, as stored in a [`Bitmap`](crate::Bitmap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque pixel of the given color.
    #[inline]
    pub const fn opaque(color: Rgb) -> Self {
        Self::new(color.r, color.g, color.b, 255)
    }

    #[inline]
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Whether this pixel takes part in quantization and dithering.
    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a >= OPAQUE_THRESHOLD
    }
}

/// Format channels as lowercase, zero-padded `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse `#rrggbb`, returning white for anything malformed.
///
/// Existing palettes tolerate bad entries, so this never fails.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    hex.parse().unwrap_or(Rgb::WHITE)
}

/// Euclidean distance in RGB space, no perceptual weighting.
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    f64::from(distance_sq(a.to_f32(), b.to_f32())).sqrt()
}

/// Squared Euclidean distance on float channels.
///
/// This is the single metric behind every nearest-color search; the root
/// is skipped because only the ordering matters there.
#[inline]
pub fn distance_sq(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

/// Round and clamp to a valid channel value.
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
