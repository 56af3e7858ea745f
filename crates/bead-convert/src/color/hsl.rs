//! HSL conversions for palette tooling.
//!
//! Hue is in degrees `[0, 360)`, saturation and lightness in percent
//! `[0, 100]`.

use super::rgb::{clamp_channel, hex_to_rgb, Rgb};

/// A color in HSL form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl From<Rgb> for Hsl {
    fn from(color: Rgb) -> Self {
        let [r, g, b] = color.to_f32().map(|c| c / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl {
                h: 0.0,
                s: 0.0,
                l: l * 100.0,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl {
            h: h * 60.0,
            s: s * 100.0,
            l: l * 100.0,
        }
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        let h = hsl.h.rem_euclid(360.0) / 360.0;
        let s = (hsl.s / 100.0).clamp(0.0, 1.0);
        let l = (hsl.l / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            let v = clamp_channel(l * 255.0);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Rgb::new(
            clamp_channel(hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0),
            clamp_channel(hue_to_channel(p, q, h) * 255.0),
            clamp_channel(hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0),
        )
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Parse a hex color (fail-soft, see [`hex_to_rgb`]) into HSL.
pub fn hex_to_hsl(hex: &str) -> Hsl {
    Hsl::from(hex_to_rgb(hex))
}

/// Format an HSL triple as canonical hex.
pub fn hsl_to_hex(h: f32, s: f32, l: f32) -> String {
    Rgb::from(Hsl { h, s, l }).to_hex()
}
