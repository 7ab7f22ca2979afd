//! Backup and in-place replacement of source videos.

use crate::error::CoreResult;
use crate::temp_files::{backup_path, remove_partial_output};

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of [`create_backup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backup {
    /// A fresh copy was written.
    Created(PathBuf),
    /// A backup from an earlier run was kept as is.
    Existing(PathBuf),
}

impl Backup {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(path) | Self::Existing(path) => path,
        }
    }
}

/// Copies `input` to `<stem>_original<ext>` unless that file already exists.
///
/// An existing backup is never overwritten: it holds the true original even
/// when `input` was already compressed by an earlier run.
pub fn create_backup(input: &Path) -> CoreResult<Backup> {
    let backup = backup_path(input)?;
    if backup.exists() {
        debug!("Backup already present: {}", backup.display());
        return Ok(Backup::Existing(backup));
    }
    fs::copy(input, &backup)?;
    Ok(Backup::Created(backup))
}

/// Moves the encoder output over the original.
///
/// The rename replaces the original in one step. If it fails, the output is
/// removed and the original is left in place.
pub fn replace_original(original: &Path, output: &Path) -> CoreResult<()> {
    if let Err(e) = fs::rename(output, original) {
        remove_partial_output(output);
        return Err(e.into());
    }
    debug!("Replaced {} with {}", original.display(), output.display());
    Ok(())
}
