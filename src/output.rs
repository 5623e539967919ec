//! CLI output formatting for the analyze and insight stages.
//!
//! Output is information-centric, not file-centric: the primary line for a
//! photo is its rank, name, and score, with the filesystem path and frame
//! details as indented context lines. Formatting lives in `format_*`
//! functions returning strings (unit-testable); the `print_*` wrappers just
//! write them to stdout.
//!
//! ```text
//! Gallery (2 photos, 1 skipped)
//! 001 dawn.jpg  87%  tack-sharp, vibrant
//!     Source: shoot/dawn.jpg
//!     6000x4000 landscape
//!     Captured: 2024-01-15 10:30:00
//! ```

use crate::analyze::{AnalyzedPhoto, BatchFailure, Outcome, ProgressEvent};
use crate::insights::{Insight, Severity};

/// One line per completed file, printed live from the progress channel.
pub fn format_progress_event(event: &ProgressEvent) -> String {
    match &event.outcome {
        Outcome::Analyzed { score } => format!(
            "  [{}/{}] {}  {:.0}%",
            event.completed,
            event.total,
            event.name,
            score * 100.0
        ),
        Outcome::Failed { error } => format!(
            "  [{}/{}] {}  skipped: {}",
            event.completed, event.total, event.name, error
        ),
    }
}

/// Multi-line gallery listing, photos in the order given (the CLI passes
/// them sorted by descending score).
pub fn format_gallery(photos: &[AnalyzedPhoto], failures: &[BatchFailure]) -> Vec<String> {
    let mut lines = Vec::new();

    let header = if failures.is_empty() {
        format!("Gallery ({} photos)", photos.len())
    } else {
        format!("Gallery ({} photos, {} skipped)", photos.len(), failures.len())
    };
    lines.push(header);

    for (index, photo) in photos.iter().enumerate() {
        let tags = if photo.tags.is_empty() {
            String::new()
        } else {
            format!("  {}", photo.tags.join(", "))
        };
        lines.push(format!(
            "{:03} {}  {:.0}%{}",
            index + 1,
            photo.name,
            photo.score * 100.0,
            tags
        ));
        lines.push(format!("    Source: {}", photo.source_path));
        lines.push(format!(
            "    {}x{} {}",
            photo.width, photo.height, photo.orientation
        ));
        if let Some(captured) = &photo.captured_at {
            lines.push(format!("    Captured: {captured}"));
        }
    }

    if !failures.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for failure in failures {
            lines.push(format!("    {}: {}", failure.name, failure.error));
        }
    }

    lines
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[info]",
        Severity::Warning => "[warn]",
        Severity::Success => "[ok]  ",
    }
}

/// Insight list, one entry per line pair.
pub fn format_insights(insights: &[Insight]) -> Vec<String> {
    if insights.is_empty() {
        return vec!["No insights — the gallery is empty.".to_string()];
    }

    let mut lines = vec!["Insights".to_string()];
    for insight in insights {
        lines.push(format!(
            "{} {}",
            severity_marker(insight.severity),
            insight.title
        ));
        lines.push(format!("       {}", insight.description));
    }
    lines
}

/// Horizontal bar chart of the 12 score buckets. Heights are already
/// normalized to [0, 100]; bars render at 1 character per 5 points.
pub fn format_histogram(heights: &[f64]) -> Vec<String> {
    let mut lines = vec!["Score distribution".to_string()];
    let bucket_width = 1.0 / heights.len() as f64;

    for (index, &height) in heights.iter().enumerate() {
        let low = index as f64 * bucket_width;
        let high = low + bucket_width;
        let bar = "#".repeat((height / 5.0).round() as usize);
        lines.push(format!("  {low:.2}-{high:.2}  {bar}"));
    }
    lines
}

pub fn print_gallery(photos: &[AnalyzedPhoto], failures: &[BatchFailure]) {
    for line in format_gallery(photos, failures) {
        println!("{line}");
    }
}

pub fn print_insights(insights: &[Insight]) {
    for line in format_insights(insights) {
        println!("{line}");
    }
}

pub fn print_histogram(heights: &[f64]) {
    for line in format_histogram(heights) {
        println!("{line}");
    }
}
