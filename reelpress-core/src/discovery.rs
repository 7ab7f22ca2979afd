//! File discovery module for finding gallery videos to process.
//!
//! Two modes are supported: scanning the top level of the video directory for
//! `.mp4` files (case-insensitive), or resolving a fixed list of file names
//! inside it. Neither mode descends into subdirectories.

use crate::error::{CoreError, CoreResult};
use crate::temp_files::{COMPRESSED_MARKER, ORIGINAL_MARKER};

use log::{debug, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Extension of the videos the gallery serves.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Finds `.mp4` files at the top level of `video_dir`, sorted by path.
///
/// Files carrying a processed-name marker are still returned; the batch
/// driver reports them as skipped.
///
/// # Errors
///
/// * `CoreError::InputDirNotFound` - If `video_dir` does not exist or is not a directory
/// * `CoreError::NoFilesFound` - If no `.mp4` files are present
///
/// # Examples
///
/// ```rust,no_run
/// use reelpress_core::find_processable_files;
/// use std::path::Path;
///
/// match find_processable_files(Path::new("frontend/video")) {
///     Ok(files) => println!("Found {} video(s) to compress", files.len()),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
pub fn find_processable_files(video_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    if !video_dir.is_dir() {
        return Err(CoreError::InputDirNotFound(video_dir.display().to_string()));
    }

    let read_dir = std::fs::read_dir(video_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext_str| ext_str.eq_ignore_ascii_case(VIDEO_EXTENSION))
                .map(|_| path.clone())
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    files.sort();
    Ok(files)
}

/// Resolves a fixed list of file names inside `video_dir`.
///
/// Names that do not exist are logged and left out; the run continues with
/// the remaining ones. Repeated names are resolved once, at their first
/// position.
///
/// # Errors
///
/// * `CoreError::InputDirNotFound` - If `video_dir` does not exist
/// * `CoreError::NoFilesFound` - If none of the names exist
pub fn resolve_file_list(video_dir: &Path, names: &[String]) -> CoreResult<Vec<PathBuf>> {
    if !video_dir.is_dir() {
        return Err(CoreError::InputDirNotFound(video_dir.display().to_string()));
    }

    let mut seen = HashSet::new();
    let files: Vec<PathBuf> = names
        .iter()
        .filter_map(|name| {
            let path = video_dir.join(name);
            if !seen.insert(path.clone()) {
                debug!("Ignoring duplicate entry {name}");
                return None;
            }
            if path.is_file() {
                Some(path)
            } else {
                warn!("Skipping {}: File not found", path.display());
                None
            }
        })
        .collect();

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}

/// Returns true when the file stem carries `_compressed` or `_original`.
#[must_use]
pub fn is_processed_name(path: &Path) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .is_some_and(|stem| stem.contains(COMPRESSED_MARKER) || stem.contains(ORIGINAL_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processed_markers() {
        assert!(is_processed_name(Path::new("IMG_7651_original.mp4")));
        assert!(is_processed_name(Path::new("dir/IMG_7651_compressed.mp4")));
        assert!(!is_processed_name(Path::new("IMG_7651.mp4")));
        assert!(!is_processed_name(Path::new("original.mp4")));
    }
}
