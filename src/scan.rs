//! Input discovery — resolving CLI arguments into a list of image files.
//!
//! Arguments may be files or directories. Directories are walked
//! recursively; only files whose extension has a compiled-in decoder are
//! kept, everything else is skipped silently. A file named explicitly, by
//! contrast, gets a hard error when it isn't a supported image — silently
//! ignoring something the user pointed at would be worse than failing.
//!
//! The result is sorted and de-duplicated so batch runs are deterministic
//! regardless of filesystem iteration order.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions with a pure-Rust decoder compiled in.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "webp"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("path does not exist: {0}")]
    NotFound(PathBuf),
    #[error("not a supported image format: {0}")]
    Unsupported(PathBuf),
}

/// True when the path's extension has a compiled-in decoder.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
}

/// Resolve argument paths into a sorted, de-duplicated list of image files.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(ScanError::NotFound(path.clone()));
        }
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() && is_supported(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else if is_supported(path) {
            files.push(path.clone());
        } else {
            return Err(ScanError::Unsupported(path.clone()));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}
