//! Decoding and downsampling — raw bytes to a bounded pixel grid.
//!
//! Every photo is analyzed at a bounded resolution: the decoded image is
//! scaled so its longer side is at most [`SAMPLE_CAP`] pixels, preserving
//! aspect ratio and never upsampling. This puts a constant ceiling on
//! per-photo cost regardless of source resolution.
//!
//! Dimension math lives in [`sample_dimensions`], a pure function that is
//! unit-testable without decoding anything.

use image::imageops::FilterType;
use thiserror::Error;

/// Longer-side cap (in pixels) for the analysis grid.
pub const SAMPLE_CAP: u32 = 640;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to decode image: {0}")]
    Undecodable(#[from] image::ImageError),
    #[error("image has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },
}

/// A downsampled RGB pixel grid, owned by the analysis run that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pub width: u32,
    pub height: u32,
    /// Row-major `[r, g, b]` samples, `width * height` entries.
    pub pixels: Vec<[u8; 3]>,
}

impl PixelGrid {
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

/// Result of decoding one photo: the analysis grid plus the source's
/// original dimensions (the grid may be smaller).
#[derive(Debug)]
pub struct DecodedImage {
    pub grid: PixelGrid,
    pub original_width: u32,
    pub original_height: u32,
}

/// Compute the analysis-grid dimensions for an image of the given size.
///
/// A single uniform scale factor `min(1, cap / longer_side)` is applied to
/// both axes; each result rounds to the nearest integer and is floored at 1.
/// Images already within the cap come back unchanged (scale exactly 1 —
/// never upsamples).
pub fn sample_dimensions(original: (u32, u32), cap: u32) -> (u32, u32) {
    let (w, h) = original;
    let longer = w.max(h);
    let scale = f64::min(1.0, cap as f64 / longer as f64);
    let out_w = ((w as f64 * scale).round() as u32).max(1);
    let out_h = ((h as f64 * scale).round() as u32).max(1);
    (out_w, out_h)
}

/// Decode raw image bytes and downsample to the analysis grid.
///
/// Fails if the bytes cannot be interpreted as an image or decode to a
/// zero-area frame.
pub fn decode_pixels(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let decoded = image::load_from_memory(bytes)?;
    let (orig_w, orig_h) = (decoded.width(), decoded.height());
    if orig_w == 0 || orig_h == 0 {
        return Err(DecodeError::ZeroArea {
            width: orig_w,
            height: orig_h,
        });
    }

    let (out_w, out_h) = sample_dimensions((orig_w, orig_h), SAMPLE_CAP);
    let sampled = if (out_w, out_h) == (orig_w, orig_h) {
        decoded
    } else {
        decoded.resize_exact(out_w, out_h, FilterType::Lanczos3)
    };

    let rgb = sampled.to_rgb8();
    let pixels = rgb.pixels().map(|p| p.0).collect();

    Ok(DecodedImage {
        grid: PixelGrid {
            width: out_w,
            height: out_h,
            pixels,
        },
        original_width: orig_w,
        original_height: orig_h,
    })
}
