use crate::error::ImageError;
use bead_convert::{Bitmap, Rgba};
use std::io::Cursor;
use std::path::Path;

/// Decode PNG bytes into an RGBA bitmap.
///
/// Palette and low bit-depth images are expanded and 16-bit channels are
/// stripped, so every supported input ends up as 8-bit gray, gray+alpha,
/// RGB or RGBA before conversion.
pub fn decode_png(data: &[u8]) -> Result<Bitmap, ImageError> {
    if data.is_empty() {
        return Err(ImageError::Empty);
    }

    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::UnsupportedBitDepth(frame.bit_depth));
    }

    let pixels: Vec<Rgba> = match frame.color_type {
        png::ColorType::Grayscale => buf.iter().map(|&v| Rgba::new(v, v, v, 255)).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .map(|p| Rgba::new(p[0], p[0], p[0], p[1]))
            .collect(),
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .map(|p| Rgba::new(p[0], p[1], p[2], 255))
            .collect(),
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .map(|p| Rgba::new(p[0], p[1], p[2], p[3]))
            .collect(),
        other => return Err(ImageError::UnsupportedColor(other)),
    };

    let bitmap = Bitmap::new(frame.width as usize, frame.height as usize, pixels)?;
    tracing::debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        color_type = ?frame.color_type,
        "Decoded PNG"
    );
    Ok(bitmap)
}

/// Read and decode a PNG file.
pub fn load_png(path: &Path) -> Result<Bitmap, ImageError> {
    let data = std::fs::read(path)?;
    decode_png(&data)
}
