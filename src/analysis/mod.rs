//! The per-photo analysis pipeline.
//!
//! | Stage | Module |
//! |---|---|
//! | **Decode + downsample** | [`decode`] — raw bytes → bounded [`PixelGrid`] |
//! | **Channel extraction** | [`channels`] — per-pixel R/G/B + BT.709 luma |
//! | **Metrics** | [`metrics`] — seven normalized scalar metrics |
//! | **Score + tags** | [`scoring`] — weighted composite score, threshold tags |
//! | **Capture timestamp** | [`exif`] — best-effort `DateTimeOriginal` scan |
//!
//! Every stage is a pure function of its inputs; the only fallible one is
//! decoding. The module split mirrors the data flow: a [`PixelGrid`] is built
//! once per photo, channels are derived from it, and the metric calculators
//! never see raw bytes.

pub mod channels;
pub mod decode;
pub mod exif;
pub mod metrics;
pub mod scoring;

pub use channels::{ChannelSet, edge_luma, extract_channels};
pub use decode::{DecodeError, DecodedImage, PixelGrid, SAMPLE_CAP, decode_pixels};
pub use exif::extract_capture_timestamp;
pub use metrics::{MetricSet, compute_metrics};
pub use scoring::{classify_tags, composite_score};
