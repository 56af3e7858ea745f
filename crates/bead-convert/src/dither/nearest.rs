use crate::bitmap::Bitmap;
use crate::output::PixelGrid;
use crate::palette::Palette;

/// Map each opaque pixel to its nearest palette entry, no error diffusion.
///
/// Uses the same metric and tie-break as [`dither_map`](super::dither_map),
/// so the two agree on the first opaque pixel of any image.
pub fn nearest_map(bitmap: &Bitmap, palette: &Palette) -> PixelGrid {
    let cells = bitmap
        .pixels()
        .iter()
        .map(|p| {
            p.is_opaque()
                .then(|| palette.find_nearest(p.rgb().to_f32()).0 as u8)
        })
        .collect();

    PixelGrid::new(bitmap.width(), bitmap.height(), cells)
}
