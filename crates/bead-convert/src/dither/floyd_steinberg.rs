//! Floyd-Steinberg error diffusion onto a pattern palette.

use super::kernel::{Kernel, FLOYD_STEINBERG};
use crate::bitmap::Bitmap;
use crate::output::PixelGrid;
use crate::palette::Palette;

/// Map `bitmap` onto `palette` with Floyd-Steinberg error diffusion.
///
/// Pixels are visited in raster order. Each opaque pixel takes the palette
/// entry nearest to its error-adjusted value, and the remainder is pushed to
/// the unvisited neighbors:
///
/// ```text
///        X   7
///    3   5   1     (/16)
/// ```
///
/// Transparent pixels come out as `None`, never receive error and never
/// emit any. Neighbors outside the bitmap are skipped. The caller's bitmap
/// is not modified.
pub fn dither_map(bitmap: &Bitmap, palette: &Palette) -> PixelGrid {
    dither_with_kernel(bitmap, palette, &FLOYD_STEINBERG)
}

/// Error diffusion with an arbitrary forward-reaching kernel.
pub fn dither_with_kernel(bitmap: &Bitmap, palette: &Palette, kernel: &Kernel) -> PixelGrid {
    let width = bitmap.width();
    let height = bitmap.height();
    let opaque: Vec<bool> = bitmap.pixels().iter().map(|p| p.is_opaque()).collect();
    let mut work: Vec<[f32; 3]> = bitmap.pixels().iter().map(|p| p.rgb().to_f32()).collect();
    let mut cells = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            if !opaque[i] {
                cells.push(None);
                continue;
            }

            let current = work[i];
            let (index, _) = palette.find_nearest(current);
            cells.push(Some(index as u8));

            let chosen = palette.color(index).to_f32();
            let error = [
                current[0] - chosen[0],
                current[1] - chosen[1],
                current[2] - chosen[2],
            ];

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + i64::from(dx);
                let ny = y as i64 + i64::from(dy);
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if !opaque[n] {
                    continue;
                }

                let share = kernel.share(weight);
                for c in 0..3 {
                    work[n][c] = (work[n][c] + error[c] * share).clamp(0.0, 255.0);
                }
            }
        }
    }

    PixelGrid::new(width, height, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgb, Rgba};

    fn black_white() -> Palette {
        Palette::from_colors(&[Rgb::BLACK, Rgb::WHITE]).unwrap()
    }

    fn grey(width: usize, height: usize, value: u8) -> Bitmap {
        Bitmap::solid(width, height, Rgba::opaque(Rgb::new(value, value, value)))
    }

    #[test]
    fn test_mid_grey_mixes_black_and_white() {
        let grid = dither_map(&grey(4, 4, 128), &black_white());

        let white = grid.cells().iter().filter(|&&c| c == Some(1)).count();
        assert!(white > 0 && white < 16);
    }

    #[test]
    fn test_average_tracks_input_over_large_area() {
        // 100% propagation: mean output brightness stays close to the input.
        for value in [64u8, 128, 192] {
            let grid = dither_map(&grey(32, 32, value), &black_white());
            let white = grid.cells().iter().filter(|&&c| c == Some(1)).count();
            let ratio = white as f64 / 1024.0;
            let expected = f64::from(value) / 255.0;

            assert!(
                (ratio - expected).abs() < 0.1,
                "grey {value}: white ratio {ratio:.3}, expected ~{expected:.3}"
            );
        }
    }

    #[test]
    fn test_exact_palette_colors_stay_put() {
        let palette = Palette::from_colors(&[Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]).unwrap();
        let bitmap = Bitmap::new(
            2,
            2,
            vec![
                Rgba::opaque(Rgb::new(255, 0, 0)),
                Rgba::opaque(Rgb::new(255, 0, 0)),
                Rgba::opaque(Rgb::new(0, 0, 255)),
                Rgba::opaque(Rgb::new(0, 0, 255)),
            ],
        )
        .unwrap();

        let grid = dither_map(&bitmap, &palette);
        assert_eq!(grid.cells(), &[Some(0), Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn test_transparent_pixels_neither_take_nor_give_error() {
        let palette = black_white();
        // If the transparent grey were quantized it would push +100 onto its
        // right neighbor and turn it white.
        let bitmap = Bitmap::new(
            3,
            1,
            vec![
                Rgba::new(100, 100, 100, 0),
                Rgba::opaque(Rgb::new(100, 100, 100)),
                Rgba::new(0, 0, 0, 10),
            ],
        )
        .unwrap();

        let grid = dither_map(&bitmap, &palette);
        assert_eq!(grid.cells(), &[None, Some(0), None]);
    }

    #[test]
    fn test_input_bitmap_untouched() {
        let bitmap = grey(5, 5, 77);
        let before = bitmap.clone();
        let _ = dither_map(&bitmap, &black_white());
        assert_eq!(bitmap, before);
    }
}
