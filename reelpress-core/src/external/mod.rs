// ============================================================================
// reelpress-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg, ffprobe and the File System
//
// This module encapsulates interactions with the external command-line tools
// and file system metadata. Every collaborator sits behind a trait so the
// batch driver can be exercised in tests without real binaries.
//
// KEY COMPONENTS:
// - FfmpegSpawner / FfmpegProcess: running ffmpeg (ffmpeg-sidecar)
// - FfprobeExecutor: probing a source into a VideoDescriptor
// - EncoderProvider: locating or downloading the ffmpeg binary
// - FileMetadataProvider: file sizes
// - Command building for the compression and poster invocations

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Compression and poster command construction and execution
pub mod ffmpeg;

/// Builders for common ffmpeg command setup and filter chains
pub mod ffmpeg_builder;

/// Traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

/// Locating, validating and downloading the encoder binary
pub mod provider;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::{EncodeParams, PosterParams, build_compress_command, build_poster_command, run_compress, run_poster};
pub use ffmpeg_builder::{FfmpegCommandBuilder, VideoFilterChain};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor};
pub use provider::{ConfiguredEncoder, DownloadingEncoder, EncoderProvider, SystemEncoder};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be executed.
///
/// Runs `<cmd> -version` and discards its output. Only a failure to start the
/// process counts as missing; the exit status is not inspected.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - If the command is not found
/// * `CoreError::CommandStart` - If the command exists but fails to start
pub fn check_dependency(cmd: &Path) -> CoreResult<()> {
    let result = Command::new(cmd)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd.display());
            Err(CoreError::DependencyNotFound(cmd.display().to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd.display(), e);
            Err(CoreError::CommandStart(cmd.display().to_string(), e))
        }
    }
}

/// Locates the ffprobe binary that belongs to `ffmpeg`.
///
/// A downloaded or user-supplied ffmpeg usually has ffprobe next to it. When
/// there is no such sibling, the `ffprobe` on `PATH` is used.
#[must_use]
pub fn companion_ffprobe(ffmpeg: &Path) -> PathBuf {
    let file_name = format!("ffprobe{}", std::env::consts::EXE_SUFFIX);
    ffmpeg
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(&file_name))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(file_name))
}

// ============================================================================
// FILE METADATA ACCESS
// ============================================================================

/// Trait for abstracting file metadata access operations.
///
/// # Examples
///
/// ```rust
/// use reelpress_core::external::FileMetadataProvider;
/// use reelpress_core::CoreResult;
/// use std::path::Path;
///
/// struct FixedSize;
///
/// impl FileMetadataProvider for FixedSize {
///     fn get_size(&self, _path: &Path) -> CoreResult<u64> {
///         Ok(4 * 1024 * 1024)
///     }
/// }
///
/// assert_eq!(FixedSize.get_size(Path::new("clip.mp4")).unwrap(), 4_194_304);
/// ```
pub trait FileMetadataProvider {
    /// Gets the size of the file at the given path in bytes.
    fn get_size(&self, path: &Path) -> CoreResult<u64>;
}

/// Standard implementation of FileMetadataProvider using `std::fs::metadata`.
#[derive(Debug, Clone, Default)]
pub struct StdFsMetadataProvider;

impl FileMetadataProvider for StdFsMetadataProvider {
    fn get_size(&self, path: &Path) -> CoreResult<u64> {
        Ok(std::fs::metadata(path)?.len())
    }
}
