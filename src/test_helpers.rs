//! Shared test utilities: in-memory synthetic images.
//!
//! PNG is the workhorse — lossless, so tests can assert exact pixel values
//! after a decode round-trip. A JPEG helper exists for exercising the
//! decoder across formats where exact values don't matter.

use image::{ExtendedColorType, ImageEncoder, RgbImage};

/// Encode a PNG from a per-pixel color function.
pub fn png_bytes(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| image::Rgb(f(x, y)));
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

/// Single-color PNG.
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    png_bytes(width, height, |_, _| rgb)
}

/// Horizontal gray ramp — nonzero contrast, entropy, and sharpness.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    png_bytes(width, height, |x, _| {
        let v = (x * 255 / width.max(1)) as u8;
        [v, v, v]
    })
}

/// Small valid JPEG, for format-coverage tests only (lossy — don't assert
/// exact pixel values).
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut out)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_round_trips_exact_pixels() {
        let bytes = solid_png(3, 2, [12, 200, 99]);
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert!(decoded.pixels().all(|p| p.0 == [12, 200, 99]));
    }

    #[test]
    fn jpeg_bytes_decode() {
        let bytes = jpeg_bytes(20, 10);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 20);
        assert_eq!(decoded.height(), 10);
    }
}
