//! Composite scoring and tag classification.
//!
//! Both are deterministic functions of a [`MetricSet`]: the score is a
//! hand-tuned weighted sum, the tags an ordered list of threshold rules.
//! Neither consults anything outside the metrics.

use super::metrics::{MetricSet, clamp01};

/// Weighted composite quality score in [0, 1].
///
/// Rewards mid-high exposure (the 0.6-target term penalizes both under- and
/// over-exposure), sharp, contrasty, information-rich, moderately saturated
/// frames. The base weights sum to 1.0; the exposure-target term is additive
/// on top, so the final clamp is mandatory and must come last.
pub fn composite_score(metrics: &MetricSet) -> f64 {
    clamp01(
        0.25 * metrics.brightness
            + 0.10 * (1.0 - (metrics.brightness - 0.6).abs())
            + 0.20 * metrics.contrast
            + 0.10 * metrics.saturation
            + 0.25 * metrics.sharpness
            + 0.10 * metrics.entropy,
    )
}

/// Ordered, non-exclusive threshold rules. Rule order is fixed and becomes
/// tag order; each rule maps to exactly one tag, so duplicates cannot occur.
pub fn classify_tags(metrics: &MetricSet) -> Vec<String> {
    let mut tags = Vec::new();
    if metrics.sharpness > 0.12 {
        tags.push("tack-sharp".to_string());
    }
    if metrics.saturation > 0.5 {
        tags.push("vibrant".to_string());
    }
    if metrics.brightness < 0.3 {
        tags.push("moody".to_string());
    }
    if metrics.brightness > 0.65 {
        tags.push("airy".to_string());
    }
    if metrics.entropy > 0.6 {
        tags.push("dynamic-range".to_string());
    }
    if metrics.contrast < 0.2 {
        tags.push("soft".to_string());
    }
    tags
}
