//! Metric calculators — seven normalized scalars per photo.
//!
//! Every calculator is a pure function over the channel arrays (sharpness
//! additionally needs the BT.601 grid with explicit width/height). All
//! results land in [0, 1]:
//!
//! | Metric | Definition |
//! |---|---|
//! | brightness | mean BT.709 luma / 255 |
//! | contrast | population std-dev of luma / 128 |
//! | saturation | mean of (max − min) / max over RGB, 0 for pure black |
//! | sharpness | √(Laplacian energy / pixel count) / 255 |
//! | highlights | clamp01(3 × fraction of luma > 200) |
//! | shadows | clamp01(3 × fraction of luma < 40) |
//! | entropy | Shannon entropy of the 256-bin luma histogram / 8 |
//!
//! Contrast and sharpness can mathematically exceed 1 (a synthetic
//! checkerboard will); both are clamped at the calculator boundary so the
//! [`MetricSet`] invariant holds. For natural photographs the clamp is a
//! no-op.

use super::channels::ChannelSet;
use super::decode::PixelGrid;
use serde::{Deserialize, Serialize};

/// Fixed record of the seven metrics, each finite and in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub sharpness: f64,
    pub highlights: f64,
    pub shadows: f64,
    pub entropy: f64,
}

pub(crate) fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn brightness(channels: &ChannelSet) -> f64 {
    mean(&channels.luma) / 255.0
}

fn contrast(channels: &ChannelSet) -> f64 {
    clamp01(population_std_dev(&channels.luma) / 128.0)
}

/// Mean per-pixel chroma spread. Pure black pixels (max == 0) contribute 0,
/// which also avoids the divide-by-zero.
fn saturation(channels: &ChannelSet) -> f64 {
    let total: f64 = (0..channels.len())
        .map(|i| {
            let max = channels.red[i].max(channels.green[i]).max(channels.blue[i]) as f64;
            let min = channels.red[i].min(channels.green[i]).min(channels.blue[i]) as f64;
            if max == 0.0 { 0.0 } else { (max - min) / max }
        })
        .sum();
    total / channels.len() as f64
}

/// Variance-of-Laplacian focus proxy.
///
/// Convolves the BT.601 grid with `[[0,-1,0],[-1,4,-1],[0,-1,0]]` over
/// interior pixels only (the 1-pixel border is excluded, no padding),
/// accumulates squared responses, normalizes by the *total* pixel count
/// (border included), takes the square root, and scales by 255.
fn sharpness(gray: &[f32], width: u32, height: u32) -> f64 {
    let (w, h) = (width as usize, height as usize);
    let mut energy = 0.0f64;

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let idx = y * w + x;
            let conv = 4.0 * gray[idx] as f64
                - gray[idx - w] as f64
                - gray[idx + w] as f64
                - gray[idx - 1] as f64
                - gray[idx + 1] as f64;
            energy += conv * conv;
        }
    }

    clamp01((energy / (w * h) as f64).sqrt() / 255.0)
}

/// Gain on the clipped-pixel fraction; a tuning constant, not a physical
/// model. At 3x, ~33% clipping reads as fully saturated.
const CLIP_GAIN: f64 = 3.0;

/// Fraction of luma values past a threshold, scaled by [`CLIP_GAIN`].
fn clipped_fraction(luma: &[f64], predicate: impl Fn(f64) -> bool) -> f64 {
    let clipped = luma.iter().filter(|&&v| predicate(v)).count();
    clamp01(CLIP_GAIN * clipped as f64 / luma.len() as f64)
}

/// Shannon entropy of the luma histogram, normalized by the 8-bit maximum.
fn entropy(luma: &[f64]) -> f64 {
    let mut histogram = [0u32; 256];
    for &value in luma {
        let bin = (value.round() as usize).min(255);
        histogram[bin] += 1;
    }

    let total = luma.len() as f64;
    let mut bits = 0.0;
    for &count in &histogram {
        if count == 0 {
            continue;
        }
        let p = count as f64 / total;
        bits -= p * p.log2();
    }
    bits / 8.0
}

/// Compute all seven metrics for one decoded photo.
pub fn compute_metrics(grid: &PixelGrid, channels: &ChannelSet) -> MetricSet {
    let gray = super::channels::edge_luma(grid);
    MetricSet {
        brightness: brightness(channels),
        contrast: contrast(channels),
        saturation: saturation(channels),
        sharpness: sharpness(&gray, grid.width, grid.height),
        highlights: clipped_fraction(&channels.luma, |v| v > 200.0),
        shadows: clipped_fraction(&channels.luma, |v| v < 40.0),
        entropy: entropy(&channels.luma),
    }
}

impl MetricSet {
    /// True when every field is finite and in [0, 1]. A violation indicates
    /// a calculator defect.
    pub fn is_normalized(&self) -> bool {
        [
            self.brightness,
            self.contrast,
            self.saturation,
            self.sharpness,
            self.highlights,
            self.shadows,
            self.entropy,
        ]
        .iter()
        .all(|v| v.is_finite() && (0.0..=1.0).contains(v))
    }
}
