//! Auto-template enhancement: a per-pixel hue-family stylization.
//!
//! Greens get greener and browns get warmer before quantization, so
//! foliage and bark survive palette reduction as distinct bead colors.

use crate::bitmap::Bitmap;
use crate::color::{clamp_channel, Rgba};

/// Shift every opaque pixel toward its hue family.
///
/// No pixel influences another. Transparent pixels and all alpha values are
/// left alone.
pub fn auto_template(bitmap: &mut Bitmap) {
    bitmap.map_pixels(enhance_pixel);
}

/// Enhance a single pixel.
///
/// - green-dominant (`g > r` and `g > b`): green x1.2, red and blue x0.9
/// - brown (`r > g > b`, `80 <= r <= 220`, `r - b >= 30`): red x1.1,
///   blue x0.85
pub fn enhance_pixel(pixel: Rgba) -> Rgba {
    if !pixel.is_opaque() {
        return pixel;
    }

    let (r, g, b) = (pixel.r, pixel.g, pixel.b);
    let scale = |value: u8, factor: f32| clamp_channel(value as f32 * factor);

    if g > r && g > b {
        Rgba::new(scale(r, 0.9), scale(g, 1.2), scale(b, 0.9), pixel.a)
    } else if r > g && g > b && (80..=220).contains(&r) && r - b >= 30 {
        Rgba::new(scale(r, 1.1), g, scale(b, 0.85), pixel.a)
    } else {
        pixel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_green_is_boosted() {
        assert_eq!(
            enhance_pixel(Rgba::new(100, 150, 50, 255)),
            Rgba::new(90, 180, 45, 255)
        );
    }

    #[test]
    fn test_green_clamps_at_255() {
        assert_eq!(enhance_pixel(Rgba::new(0, 250, 0, 200)).g, 255);
    }

    #[test]
    fn test_brown_is_warmed() {
        assert_eq!(
            enhance_pixel(Rgba::new(150, 100, 60, 255)),
            Rgba::new(165, 100, 51, 255)
        );
    }

    #[test]
    fn test_brown_needs_range_and_spread() {
        // Too bright
        let bright = Rgba::new(230, 120, 60, 255);
        assert_eq!(enhance_pixel(bright), bright);
        // Red minus blue below 30
        let flat = Rgba::new(120, 110, 100, 255);
        assert_eq!(enhance_pixel(flat), flat);
    }

    #[test]
    fn test_other_colors_unchanged() {
        for pixel in [
            Rgba::new(200, 200, 200, 255),
            Rgba::new(0, 0, 255, 255),
            Rgba::new(255, 0, 0, 255),
        ] {
            assert_eq!(enhance_pixel(pixel), pixel);
        }
    }

    #[test]
    fn test_transparent_untouched() {
        let pixel = Rgba::new(10, 200, 10, 40);
        assert_eq!(enhance_pixel(pixel), pixel);
    }

    #[test]
    fn test_auto_template_maps_every_pixel() {
        let mut bitmap = Bitmap::new(
            2,
            1,
            vec![Rgba::new(100, 150, 50, 255), Rgba::new(10, 10, 10, 255)],
        )
        .unwrap();
        auto_template(&mut bitmap);

        assert_eq!(bitmap.get(0, 0), Rgba::new(90, 180, 45, 255));
        assert_eq!(bitmap.get(1, 0), Rgba::new(10, 10, 10, 255));
    }
}
