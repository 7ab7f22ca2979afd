//! Configuration structures and constants for the reelpress-core library.
//!
//! This module replaces the hard-coded paths and file lists of a one-off
//! compression script with an explicit `CoreConfig` that is passed into the
//! batch driver.

mod builder;

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::utils::parse_ffmpeg_time;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default video directory, relative to the website root.
pub const DEFAULT_VIDEO_DIR: &str = "frontend/video";

/// Target output size in megabytes used to derive the encoding bitrate.
pub const DEFAULT_TARGET_SIZE_MB: f64 = 4.0;

/// Widest frame the target-size profile keeps before scaling down.
pub const DEFAULT_MAX_WIDTH: u32 = 1280;

/// Widest frame the mobile-friendly profile keeps before scaling down.
pub const DEFAULT_MOBILE_MAX_WIDTH: u32 = 720;

/// Offset of the frame used for poster images.
pub const DEFAULT_POSTER_OFFSET: &str = "00:00:01";

/// Poster images wider than this are scaled down.
pub const DEFAULT_POSTER_MAX_WIDTH: u32 = 720;

/// Encoder parameter set applied to every file of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodeProfile {
    /// Average bitrate derived from the target size, CRF 28, 1280px wide at most.
    #[default]
    TargetSize,
    /// Main profile level 3.1, yuv420p, CRF 23, 720px wide at most.
    MobileFriendly,
}

impl EncodeProfile {
    /// Width limit used when the configuration does not set one.
    #[must_use]
    pub fn default_max_width(self) -> u32 {
        match self {
            Self::TargetSize => DEFAULT_MAX_WIDTH,
            Self::MobileFriendly => DEFAULT_MOBILE_MAX_WIDTH,
        }
    }
}

impl fmt::Display for EncodeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetSize => f.write_str("target-size"),
            Self::MobileFriendly => f.write_str("mobile"),
        }
    }
}

impl FromStr for EncodeProfile {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "target-size" | "target_size" | "size" => Ok(Self::TargetSize),
            "mobile" | "mobile-friendly" | "mobile_friendly" => Ok(Self::MobileFriendly),
            other => Err(CoreError::Config(format!("Unknown encode profile '{other}'"))),
        }
    }
}

/// Main configuration structure for the reelpress-core library.
///
/// Created by the consumer of the library (e.g. reelpress-cli) and passed to
/// [`crate::process_videos`]. The encoder binary is not part of the
/// configuration; it is resolved separately through an
/// [`crate::external::EncoderProvider`].
///
/// # Examples
///
/// ```rust
/// use reelpress_core::config::{CoreConfigBuilder, EncodeProfile};
///
/// let config = CoreConfigBuilder::new()
///     .video_dir("frontend/video")
///     .file_list(vec!["IMG_7651.mp4".to_string()])
///     .profile(EncodeProfile::MobileFriendly)
///     .generate_posters(true)
///     .build();
///
/// assert_eq!(config.max_width, 720);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing the gallery videos
    pub video_dir: PathBuf,

    /// Optional fixed list of file names inside `video_dir`.
    /// When `None`, every `.mp4` at the top level of `video_dir` is processed.
    pub file_list: Option<Vec<String>>,

    /// Directory for poster images (defaults to `<video_dir>/../img`)
    pub poster_dir: Option<PathBuf>,

    /// Target output size in megabytes
    pub target_size_mb: f64,

    /// Frames wider than this are scaled down, keeping the aspect ratio
    pub max_width: u32,

    /// Encoder parameter set
    pub profile: EncodeProfile,

    /// Copy each original to `<stem>_original<ext>` before replacing it
    pub backup_originals: bool,

    /// Extract a poster image for each processed video
    pub generate_posters: bool,

    /// Timestamp (HH:MM:SS) of the poster frame
    pub poster_offset: String,

    /// Optional width limit for poster images
    pub poster_max_width: Option<u32>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            video_dir: PathBuf::from(DEFAULT_VIDEO_DIR),
            file_list: None,
            poster_dir: None,
            target_size_mb: DEFAULT_TARGET_SIZE_MB,
            max_width: DEFAULT_MAX_WIDTH,
            profile: EncodeProfile::default(),
            backup_originals: true,
            generate_posters: false,
            poster_offset: DEFAULT_POSTER_OFFSET.to_string(),
            poster_max_width: Some(DEFAULT_POSTER_MAX_WIDTH),
        }
    }
}

impl CoreConfig {
    /// Creates a configuration for `video_dir` with default settings.
    pub fn new(video_dir: PathBuf) -> Self {
        Self {
            video_dir,
            ..Self::default()
        }
    }

    /// Directory that receives poster images.
    #[must_use]
    pub fn effective_poster_dir(&self) -> PathBuf {
        self.poster_dir.clone().unwrap_or_else(|| {
            self.video_dir
                .parent()
                .map_or_else(|| PathBuf::from("img"), |parent| parent.join("img"))
        })
    }

    /// Validates the configuration values.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.target_size_mb.is_finite() || self.target_size_mb <= 0.0 {
            return Err(CoreError::Config(format!(
                "Target size must be a positive number of megabytes, got {}",
                self.target_size_mb
            )));
        }

        if self.max_width == 0 {
            return Err(CoreError::Config("Maximum width must be greater than 0".to_string()));
        }

        if self.poster_max_width == Some(0) {
            return Err(CoreError::Config(
                "Poster maximum width must be greater than 0".to_string(),
            ));
        }

        if parse_ffmpeg_time(&self.poster_offset).is_none() {
            return Err(CoreError::Config(format!(
                "Poster offset must be HH:MM:SS, got '{}'",
                self.poster_offset
            )));
        }

        if let Some(names) = &self.file_list {
            if names.is_empty() {
                return Err(CoreError::Config("File list is empty".to_string()));
            }
            if let Some(bad) = names.iter().find(|name| !is_bare_file_name(name)) {
                return Err(CoreError::Config(format!(
                    "File list entries must be plain file names inside the video directory, got '{bad}'"
                )));
            }
        }

        Ok(())
    }
}

fn is_bare_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
