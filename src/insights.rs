//! Gallery-level insights and the score histogram.
//!
//! Both functions are pure and stateless: they are recomputed from the
//! current (collection, brief) pair on every change, never cached or
//! mutated in place. Given well-formed records they cannot fail — an empty
//! collection simply produces no insights and an all-zero histogram, which
//! is defined behavior, not an error.
//!
//! Insight order is fixed: gallery health, then orientation coverage (if
//! any), then mood coverage (if any).

use crate::analyze::AnalyzedPhoto;
use crate::brief::{ClientBrief, DesiredOrientation};
use serde::Serialize;

/// Score threshold for the "standout frames" count in the health insight.
const STANDOUT_SCORE: f64 = 0.8;

/// Minimum orientation coverage before the gallery is flagged.
const ORIENTATION_FLOOR: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

/// One ranked observation about the gallery. Derived and stateless.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Compare the collection's aggregate statistics against the brief.
///
/// An empty collection produces no insights at all.
pub fn generate_insights(photos: &[AnalyzedPhoto], brief: &ClientBrief) -> Vec<Insight> {
    if photos.is_empty() {
        return Vec::new();
    }

    let total = photos.len() as f64;
    let average = photos.iter().map(|p| p.score).sum::<f64>() / total;
    let standouts = photos.iter().filter(|p| p.score > STANDOUT_SCORE).count();

    let mut insights = vec![Insight {
        severity: Severity::Info,
        title: "Gallery Health".to_string(),
        description: format!(
            "Average quality score sits at {:.1}%. {} frames are above 80%.",
            average * 100.0,
            standouts
        ),
    }];

    let matching = photos
        .iter()
        .filter(|p| brief.orientation.matches(p.orientation))
        .count() as f64;
    let ratio = matching / total;

    if ratio < ORIENTATION_FLOOR {
        insights.push(Insight {
            severity: Severity::Warning,
            title: "Orientation Mismatch".to_string(),
            description: format!(
                "Only {:.0}% of images match the requested {} framing. Consider re-framing selections.",
                ratio * 100.0,
                brief.orientation
            ),
        });
    } else if brief.orientation != DesiredOrientation::Any {
        insights.push(Insight {
            severity: Severity::Success,
            title: "Orientation Coverage".to_string(),
            description: format!(
                "{:.0}% of the gallery aligns with the desired {} aspect.",
                ratio * 100.0,
                brief.orientation
            ),
        });
    }

    // Keyword hits keep the brief's order, not the photos'.
    let keyword_hits: Vec<&str> = brief
        .mood_keywords
        .iter()
        .filter(|keyword| {
            photos
                .iter()
                .any(|p| p.tags.iter().any(|t| t == keyword.as_str()))
        })
        .map(String::as_str)
        .collect();

    if !brief.mood_keywords.is_empty() && keyword_hits.is_empty() {
        insights.push(Insight {
            severity: Severity::Warning,
            title: "Mood Gap".to_string(),
            description: "Tags did not match any of the moods in the brief. \
                          Review lighting and color to bridge the gap."
                .to_string(),
        });
    } else if !keyword_hits.is_empty() {
        insights.push(Insight {
            severity: Severity::Success,
            title: "Mood Coverage".to_string(),
            description: format!(
                "Tagging surfaced {} moods from the brief: {}.",
                keyword_hits.len(),
                keyword_hits.join(", ")
            ),
        });
    }

    insights
}

/// Number of equal-width score buckets in the histogram.
pub const HISTOGRAM_BUCKETS: usize = 12;

/// Bin the score distribution into bucket heights normalized to [0, 100].
///
/// Bucket index is `floor(score * 12)`, clamped to 11 so a perfect 1.0
/// lands in the top bucket. Heights are scaled by the fullest bucket, so
/// whenever any photo exists, max(heights) == 100. An empty collection is
/// all zeros.
pub fn build_histogram(photos: &[AnalyzedPhoto]) -> Vec<f64> {
    let mut buckets = vec![0u32; HISTOGRAM_BUCKETS];
    if photos.is_empty() {
        return buckets.into_iter().map(f64::from).collect();
    }

    for photo in photos {
        let index = ((photo.score * HISTOGRAM_BUCKETS as f64) as usize).min(HISTOGRAM_BUCKETS - 1);
        buckets[index] += 1;
    }

    let max = buckets.iter().copied().max().unwrap_or(0).max(1) as f64;
    buckets
        .into_iter()
        .map(|count| count as f64 / max * 100.0)
        .collect()
}
