//! Working file paths for a compression run.
//!
//! Every artifact of a run lives next to its source video and is named after
//! it: the encoder writes to `<stem>_compressed<ext>`, the backup copy is
//! `<stem>_original<ext>`, and posters go to `<poster_dir>/<stem>_poster.jpg`.
//! The markers double as the "already processed" signal used by discovery.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{CoreError, CoreResult};

/// Stem marker of the encoder's temporary output.
pub const COMPRESSED_MARKER: &str = "_compressed";

/// Stem marker of backup copies.
pub const ORIGINAL_MARKER: &str = "_original";

/// Suffix (before `.jpg`) of poster images.
pub const POSTER_SUFFIX: &str = "_poster";

fn split_name(path: &Path) -> CoreResult<(String, String)> {
    let stem = path
        .file_stem()
        .ok_or_else(|| {
            CoreError::PathError(format!("Failed to get filename stem for {}", path.display()))
        })?
        .to_string_lossy()
        .to_string();
    let extension = path
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    Ok((stem, extension))
}

fn sibling(path: &Path, file_name: String) -> PathBuf {
    path.parent()
        .map_or_else(|| PathBuf::from(&file_name), |parent| parent.join(&file_name))
}

/// Returns `<stem>_compressed<ext>` in the directory of `input`.
pub fn compressed_output_path(input: &Path) -> CoreResult<PathBuf> {
    let (stem, extension) = split_name(input)?;
    Ok(sibling(input, format!("{stem}{COMPRESSED_MARKER}{extension}")))
}

/// Returns `<stem>_original<ext>` in the directory of `input`.
pub fn backup_path(input: &Path) -> CoreResult<PathBuf> {
    let (stem, extension) = split_name(input)?;
    Ok(sibling(input, format!("{stem}{ORIGINAL_MARKER}{extension}")))
}

/// Returns `<poster_dir>/<stem>_poster.jpg`.
pub fn poster_path(input: &Path, poster_dir: &Path) -> CoreResult<PathBuf> {
    let (stem, _) = split_name(input)?;
    Ok(poster_dir.join(format!("{stem}{POSTER_SUFFIX}.jpg")))
}

/// Deletes a partially written encoder output, if one exists.
///
/// Failures are logged rather than returned: the caller is already handling
/// the error that caused the cleanup.
pub fn remove_partial_output(path: &Path) {
    if !path.exists() {
        return;
    }
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed partial output {}", path.display()),
        Err(e) => warn!("Could not remove partial output {}: {}", path.display(), e),
    }
}
