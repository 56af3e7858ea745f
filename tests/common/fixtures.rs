//! Test fixtures: PNG builders for conversion requests.

/// Encode 8-bit RGBA pixels as a PNG
pub fn rgba_png(width: u32, height: u32, pixels: &[[u8; 4]]) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    encode(width, height, png::ColorType::Rgba, &data)
}

/// Encode 8-bit RGB pixels as a PNG
pub fn rgb_png(width: u32, height: u32, pixels: &[[u8; 3]]) -> Vec<u8> {
    assert_eq!(pixels.len(), (width * height) as usize);
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    encode(width, height, png::ColorType::Rgb, &data)
}

fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("PNG header");
        writer.write_image_data(data).expect("PNG data");
    }
    out
}

/// Top half red, bottom half blue
pub fn red_over_blue(width: u32, height: u32) -> Vec<u8> {
    let pixels: Vec<[u8; 3]> = (0..width * height)
        .map(|i| {
            if i / width < height / 2 {
                [255, 0, 0]
            } else {
                [0, 0, 255]
            }
        })
        .collect();
    rgb_png(width, height, &pixels)
}

/// Smooth two-axis gradient, many distinct colors
pub fn gradient(width: u32, height: u32) -> Vec<u8> {
    let pixels: Vec<[u8; 3]> = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            [
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) * 127 / (width + height).max(1)) as u8,
            ]
        })
        .collect();
    rgb_png(width, height, &pixels)
}

/// Opaque green square on a fully transparent background
pub fn green_on_transparent(size: u32) -> Vec<u8> {
    let pixels: Vec<[u8; 4]> = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            let inside = x >= size / 4 && x < size * 3 / 4 && y >= size / 4 && y < size * 3 / 4;
            if inside {
                [10, 200, 10, 255]
            } else {
                [0, 0, 0, 0]
            }
        })
        .collect();
    rgba_png(size, size, &pixels)
}
