//! Channel extraction — per-pixel color and luma arrays.
//!
//! Two luma definitions are in play, deliberately:
//!
//! - **BT.709** (0.2126 R + 0.7152 G + 0.0722 B) feeds brightness, contrast,
//!   clipping, and entropy.
//! - **BT.601** (0.299 R + 0.587 G + 0.114 B) feeds only the sharpness
//!   convolution, matching conventional edge-detection weighting.
//!
//! Both are pure functions of the grid with no side effects.

use super::decode::PixelGrid;

/// Parallel per-pixel channel arrays derived from a [`PixelGrid`].
///
/// All four vectors have exactly `grid.pixel_count()` entries and are never
/// mutated after extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSet {
    pub red: Vec<u8>,
    pub green: Vec<u8>,
    pub blue: Vec<u8>,
    /// BT.709 luma, in [0, 255].
    pub luma: Vec<f64>,
}

impl ChannelSet {
    pub fn len(&self) -> usize {
        self.luma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.luma.is_empty()
    }
}

/// Split a pixel grid into per-channel arrays with BT.709 luma.
pub fn extract_channels(grid: &PixelGrid) -> ChannelSet {
    let mut channels = ChannelSet {
        red: Vec::with_capacity(grid.pixel_count()),
        green: Vec::with_capacity(grid.pixel_count()),
        blue: Vec::with_capacity(grid.pixel_count()),
        luma: Vec::with_capacity(grid.pixel_count()),
    };

    for &[r, g, b] in &grid.pixels {
        channels.red.push(r);
        channels.green.push(g);
        channels.blue.push(b);
        channels
            .luma
            .push(0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64);
    }

    channels
}

/// BT.601 grayscale grid for the sharpness convolution, row-major to match
/// the pixel grid.
pub fn edge_luma(grid: &PixelGrid) -> Vec<f32> {
    grid.pixels
        .iter()
        .map(|&[r, g, b]| 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32)
        .collect()
}
