//! Core library for compressing gallery videos with ffmpeg.
//!
//! This crate provides video file discovery, bitrate and resize planning,
//! H.264 encoding through ffmpeg, in-place replacement of originals with
//! optional backups, poster frame extraction and encoder provisioning.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use reelpress_core::{CoreConfigBuilder, find_processable_files, process_videos};
//! use reelpress_core::external::{
//!     CrateFfprobeExecutor, DownloadingEncoder, EncoderProvider, SidecarSpawner,
//!     StdFsMetadataProvider, companion_ffprobe,
//! };
//! use std::path::PathBuf;
//!
//! let config = CoreConfigBuilder::new()
//!     .video_dir("frontend/video")
//!     .target_size_mb(4.0)
//!     .generate_posters(true)
//!     .build();
//! config.validate().unwrap();
//!
//! let files = find_processable_files(&config.video_dir).unwrap();
//! let ffmpeg = DownloadingEncoder::new(PathBuf::from("ffmpeg_bin"))
//!     .ensure_available()
//!     .unwrap();
//!
//! let summary = process_videos(
//!     &SidecarSpawner,
//!     &CrateFfprobeExecutor::with_binary(companion_ffprobe(&ffmpeg)),
//!     &StdFsMetadataProvider,
//!     &config,
//!     &ffmpeg,
//!     &files,
//! ).unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod temp_files;
pub mod terminal_output;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder, EncodeProfile};
pub use discovery::{find_processable_files, is_processed_name, resolve_file_list};
pub use error::{CoreError, CoreResult};
pub use processing::{
    CompressionPlan, PlannedVideo, Resolution, VideoDescriptor, plan, plan_videos, process_videos,
};
pub use utils::{calculate_size_reduction, format_bytes, format_duration, parse_ffmpeg_time};

use std::path::PathBuf;
use std::time::Duration;

/// Result of a successful compression, containing statistics about the process.
///
/// Returned inside [`BatchSummary`] for each video that was replaced.
#[derive(Debug, Clone)]
pub struct EncodeResult {
    pub filename: String,
    pub duration: Duration,
    pub input_size: u64,
    pub output_size: u64,
    /// Dimensions the video was scaled to, if it was wider than the limit
    pub resized_to: Option<Resolution>,
    /// Poster written for this video
    pub poster: Option<PathBuf>,
}

/// Outcome of a whole batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Videos that were compressed and replaced
    pub results: Vec<EncodeResult>,
    /// Names skipped because they carry a processed marker
    pub skipped: Vec<String>,
    /// Names whose compression failed; their originals are untouched
    pub failed: Vec<String>,
}

impl BatchSummary {
    /// Bytes saved across all compressed videos (negative if output grew).
    #[must_use]
    pub fn bytes_saved(&self) -> i64 {
        self.results
            .iter()
            .map(|r| r.input_size as i64 - r.output_size as i64)
            .sum()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
