//! Core video processing logic and orchestration.
//!
//! This module groups the steps of a compression run: planning the target
//! bitrate and size, backing up and replacing originals, and the batch
//! driver that ties them to the ffmpeg and ffprobe integrations.

/// Bitrate and resize planning
pub mod plan;

/// Backups and in-place replacement of originals
pub mod replace;

/// Sequential batch driver and dry-run planning
pub mod batch;

pub use batch::{PlannedVideo, plan_videos, process_videos};
pub use plan::{CompressionPlan, Resolution, VideoDescriptor, plan};
pub use replace::{Backup, create_backup, replace_original};
