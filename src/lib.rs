//! # Proofsheet
//!
//! Batch photo quality scoring and gallery insights for client shoots.
//! Point it at a directory of images and it computes objective per-photo
//! metrics, a composite quality score, and descriptive tags, then checks the
//! gallery as a whole against a client brief.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Analyze   images/  →  manifest.json    (pixels → scored records)
//! 2. Insights  manifest + brief.toml  →  observations + score histogram
//! ```
//!
//! The analyze stage is per-photo and embarrassingly parallel: each file is
//! decoded, downsampled to a bounded grid, measured, scored, and tagged with
//! no shared state between photos. The insights stage is a pure function of
//! the record collection and the brief, so it can be re-run against a saved
//! manifest without touching pixels again.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`analysis`] | Per-photo pipeline: decode/downsample, channels, metrics, score, tags, timestamp |
//! | [`analyze`] | Runs the per-photo pipeline over a batch, producing [`analyze::AnalyzedPhoto`] records |
//! | [`scan`] | Input discovery — walks argument paths and keeps decodable image files |
//! | [`brief`] | `brief.toml` loading, normalization, and the documented stock template |
//! | [`insights`] | Gallery-level observations against the brief + score histogram |
//! | [`output`] | CLI output formatting — gallery listing, insight list, histogram bars |
//!
//! # Design Decisions
//!
//! ## Deterministic Scoring
//!
//! The composite score is a hand-tuned weighted sum of normalized metrics,
//! not a trained model. The same bytes always produce the same record: photo
//! ids are content hashes, the downsample cap bounds per-photo cost, and no
//! stage consults anything outside its inputs. Reproducibility is the
//! contract; "accuracy" in a ground-truth sense is explicitly not.
//!
//! ## Bounded Analysis Grid
//!
//! Every image is downsampled so its longer side is at most 640 pixels before
//! any metric runs. This makes per-photo cost roughly constant regardless of
//! source resolution and keeps a few-hundred-frame shoot interactive on a
//! laptop. The metrics are whole-frame statistics, so the downsample loses
//! nothing they care about.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding uses the `image` crate's pure-Rust decoders (JPEG, PNG, TIFF,
//! WebP). No ImageMagick, no system libraries — the binary is fully
//! self-contained.
//!
//! ## Best-Effort Timestamps
//!
//! Capture timestamps come from a narrow byte scan for the EXIF
//! `DateTimeOriginal` marker, not a real EXIF parser. The scan is isolated
//! behind a single function returning `Option<String>` so it can be swapped
//! for a proper metadata parser without touching the rest of the pipeline.

pub mod analysis;
pub mod analyze;
pub mod brief;
pub mod insights;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
