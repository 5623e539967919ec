//! Batch analysis orchestration.
//!
//! For each input file: decode → downsample, extract channels, compute the
//! metric set, derive score and tags, attempt timestamp extraction, and
//! assemble one immutable [`AnalyzedPhoto`] record. A batch runs photos in
//! parallel with [rayon](https://docs.rs/rayon); per-file failures are
//! collected and reported, never aborting the rest of the run.
//!
//! ## Progress Reporting
//!
//! Callers may pass an `mpsc::Sender<ProgressEvent>`; workers send one event
//! per completed file. The completion counter is atomic, so counts reflect
//! actual completions regardless of which worker finishes first.
//!
//! ## Record Immutability
//!
//! An [`AnalyzedPhoto`] is created once and never mutated. Anything a
//! workflow layers on top (selection, shortlists, a hero frame) belongs in
//! separate maps keyed by [`AnalyzedPhoto::id`], not inside the record.

use crate::analysis::{
    DecodeError, classify_tags, composite_score, compute_metrics, decode_pixels,
    extract_capture_timestamp, extract_channels,
};
use crate::analysis::metrics::MetricSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Frame orientation, derived from original dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    /// Square iff width == height, landscape iff width > height, else
    /// portrait — exhaustive and mutually exclusive.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width == height {
            Orientation::Square
        } else if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Landscape => write!(f, "landscape"),
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Square => write!(f, "square"),
        }
    }
}

/// One analyzed photo. Created by [`analyze_bytes`], immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedPhoto {
    /// Content-derived id: hex prefix of the SHA-256 of the file bytes.
    /// Stable across runs — the same bytes always get the same id.
    pub id: String,
    /// Source file name (no directory).
    pub name: String,
    /// Path the photo was read from.
    pub source_path: String,
    /// Original width, before downsampling.
    pub width: u32,
    /// Original height, before downsampling.
    pub height: u32,
    pub orientation: Orientation,
    pub metrics: MetricSet,
    /// Composite quality score in [0, 1].
    pub score: f64,
    /// Tags in classification-rule order.
    pub tags: Vec<String>,
    /// Best-effort capture timestamp, `YYYY-MM-DD HH:MM:SS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
}

/// The JSON manifest written after an analyze run.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub photos: Vec<AnalyzedPhoto>,
}

fn content_id(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    // 8 bytes of hash is plenty for a shoot-sized collection.
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}

/// Analyze one photo from raw bytes.
pub fn analyze_bytes(
    name: &str,
    source_path: &str,
    bytes: &[u8],
) -> Result<AnalyzedPhoto, AnalyzeError> {
    let decoded = decode_pixels(bytes)?;
    let channels = extract_channels(&decoded.grid);
    let metrics = compute_metrics(&decoded.grid, &channels);
    let score = composite_score(&metrics);
    let tags = classify_tags(&metrics);
    // Independent of the pixel pipeline; failures are silent by contract.
    let captured_at = extract_capture_timestamp(bytes);

    Ok(AnalyzedPhoto {
        id: content_id(bytes),
        name: name.to_string(),
        source_path: source_path.to_string(),
        width: decoded.original_width,
        height: decoded.original_height,
        orientation: Orientation::from_dimensions(decoded.original_width, decoded.original_height),
        metrics,
        score,
        tags,
        captured_at,
    })
}

/// Analyze one photo from disk.
pub fn analyze_file(path: &Path) -> Result<AnalyzedPhoto, AnalyzeError> {
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    analyze_bytes(&name, &path.display().to_string(), &bytes)
}

/// Outcome carried by a [`ProgressEvent`].
#[derive(Debug, Clone)]
pub enum Outcome {
    Analyzed { score: f64 },
    Failed { error: String },
}

/// Sent once per completed file, in completion order.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    /// Files completed so far, including this one.
    pub completed: usize,
    /// Files submitted to the batch.
    pub total: usize,
    pub name: String,
    pub outcome: Outcome,
}

/// A file the batch skipped, with the reason.
#[derive(Debug, Clone)]
pub struct BatchFailure {
    pub name: String,
    pub error: String,
}

/// Result of a batch run. `photos` is in input order; callers sort as they
/// see fit (the CLI sorts by descending score).
#[derive(Debug)]
pub struct BatchResult {
    pub photos: Vec<AnalyzedPhoto>,
    pub failures: Vec<BatchFailure>,
}

/// Analyze a batch of files in parallel.
///
/// Each file is independent: a failure is recorded and the batch continues.
/// Progress events, when requested, carry accurate completion counts — the
/// counter increments as work actually finishes, not in submission order.
pub fn analyze_batch(files: &[PathBuf], progress: Option<Sender<ProgressEvent>>) -> BatchResult {
    let total = files.len();
    let completed = AtomicUsize::new(0);

    // collect() on the indexed par_iter keeps input order; only the
    // progress events arrive in completion order.
    let outcomes: Vec<Result<AnalyzedPhoto, BatchFailure>> = files
        .par_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let result = analyze_file(path).map_err(|e| BatchFailure {
                name: name.clone(),
                error: e.to_string(),
            });

            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(tx) = &progress {
                let outcome = match &result {
                    Ok(photo) => Outcome::Analyzed { score: photo.score },
                    Err(failure) => Outcome::Failed {
                        error: failure.error.clone(),
                    },
                };
                // A dropped receiver just means nobody is listening.
                let _ = tx.send(ProgressEvent {
                    completed: done,
                    total,
                    name,
                    outcome,
                });
            }

            result
        })
        .collect();

    let mut photos = Vec::new();
    let mut failures = Vec::new();
    for result in outcomes {
        match result {
            Ok(photo) => photos.push(photo),
            Err(failure) => failures.push(failure),
        }
    }

    BatchResult { photos, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient_png, png_bytes, solid_png};
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    // =========================================================================
    // Orientation tests
    // =========================================================================

    #[test]
    fn orientation_is_exhaustive_and_exclusive() {
        assert_eq!(Orientation::from_dimensions(100, 100), Orientation::Square);
        assert_eq!(Orientation::from_dimensions(200, 100), Orientation::Landscape);
        assert_eq!(Orientation::from_dimensions(100, 200), Orientation::Portrait);
        assert_eq!(Orientation::from_dimensions(101, 100), Orientation::Landscape);
        assert_eq!(Orientation::from_dimensions(100, 101), Orientation::Portrait);
    }

    // =========================================================================
    // analyze_bytes tests
    // =========================================================================

    #[test]
    fn black_square_record() {
        let bytes = solid_png(2, 2, [0, 0, 0]);
        let photo = analyze_bytes("black.png", "shoot/black.png", &bytes).unwrap();

        assert_eq!(photo.width, 2);
        assert_eq!(photo.height, 2);
        assert_eq!(photo.orientation, Orientation::Square);
        assert!((photo.score - 0.04).abs() < 1e-9);
        assert_eq!(photo.tags, vec!["moody", "soft"]);
        assert_eq!(photo.captured_at, None);
        assert!(photo.metrics.is_normalized());
    }

    #[test]
    fn id_is_deterministic_per_content() {
        let a = solid_png(4, 4, [10, 20, 30]);
        let b = solid_png(4, 4, [10, 20, 31]);

        let first = analyze_bytes("a.png", "a.png", &a).unwrap();
        let again = analyze_bytes("renamed.png", "elsewhere/renamed.png", &a).unwrap();
        let other = analyze_bytes("b.png", "b.png", &b).unwrap();

        assert_eq!(first.id, again.id);
        assert_ne!(first.id, other.id);
        assert_eq!(first.id.len(), 16);
    }

    #[test]
    fn undecodable_bytes_error() {
        let result = analyze_bytes("junk.png", "junk.png", b"not pixels");
        assert!(matches!(result, Err(AnalyzeError::Decode(_))));
    }

    #[test]
    fn timestamp_flows_into_the_record() {
        // PNG decoders ignore trailing bytes, so append a fake EXIF-ish run.
        let mut bytes = solid_png(3, 3, [90, 90, 90]);
        bytes.extend_from_slice(b"DateTimeOriginal\x00\x012024:01:15 10:30:00");

        let photo = analyze_bytes("dated.png", "dated.png", &bytes).unwrap();
        assert_eq!(photo.captured_at, Some("2024-01-15 10:30:00".to_string()));
    }

    #[test]
    fn record_roundtrips_through_json() {
        let bytes = gradient_png(16, 12);
        let photo = analyze_bytes("ramp.png", "ramp.png", &bytes).unwrap();

        let json = serde_json::to_string(&photo).unwrap();
        let back: AnalyzedPhoto = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, photo.id);
        assert_eq!(back.orientation, photo.orientation);
        assert_eq!(back.tags, photo.tags);
        assert_eq!(back.score, photo.score);
    }

    // =========================================================================
    // analyze_batch tests
    // =========================================================================

    fn write_photos(dir: &TempDir) -> Vec<PathBuf> {
        let files = [
            ("one.png", gradient_png(64, 48)),
            ("two.png", solid_png(32, 48, [200, 180, 40])),
            ("bad.png", b"corrupted".to_vec()),
        ];
        files
            .iter()
            .map(|(name, bytes)| {
                let path = dir.path().join(name);
                fs::write(&path, bytes).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn batch_skips_failures_and_continues() {
        let tmp = TempDir::new().unwrap();
        let files = write_photos(&tmp);

        let result = analyze_batch(&files, None);

        assert_eq!(result.photos.len(), 2);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].name, "bad.png");
        assert_eq!(result.photos[0].name, "one.png");
        assert_eq!(result.photos[1].name, "two.png");
    }

    #[test]
    fn batch_progress_counts_every_completion() {
        let tmp = TempDir::new().unwrap();
        let files = write_photos(&tmp);

        let (tx, rx) = mpsc::channel();
        let result = analyze_batch(&files, Some(tx));
        let events: Vec<ProgressEvent> = rx.iter().collect();

        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.total == 3));
        // Completion counts are 1..=3 in some order, each exactly once.
        let mut counts: Vec<usize> = events.iter().map(|e| e.completed).collect();
        counts.sort_unstable();
        assert_eq!(counts, vec![1, 2, 3]);

        let failed = events
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Failed { .. }))
            .count();
        assert_eq!(failed, 1);
        assert_eq!(result.photos.len(), 2);
    }

    #[test]
    fn empty_batch_is_empty() {
        let result = analyze_batch(&[], None);
        assert!(result.photos.is_empty());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn missing_file_is_a_failure_not_a_panic() {
        let result = analyze_batch(&[PathBuf::from("/nonexistent/frame.jpg")], None);
        assert!(result.photos.is_empty());
        assert_eq!(result.failures.len(), 1);
    }

    #[test]
    fn portrait_and_landscape_survive_downsampling() {
        let tmp = TempDir::new().unwrap();
        let wide = tmp.path().join("wide.png");
        let tall = tmp.path().join("tall.png");
        fs::write(&wide, png_bytes(1400, 700, |x, _| [(x % 255) as u8, 80, 80])).unwrap();
        fs::write(&tall, png_bytes(700, 1400, |_, y| [80, (y % 255) as u8, 80])).unwrap();

        let result = analyze_batch(&[wide, tall], None);
        assert_eq!(result.photos[0].orientation, Orientation::Landscape);
        assert_eq!(result.photos[0].width, 1400);
        assert_eq!(result.photos[1].orientation, Orientation::Portrait);
        assert_eq!(result.photos[1].height, 1400);
    }
}
