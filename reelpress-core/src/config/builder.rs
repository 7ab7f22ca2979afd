// ============================================================================
// reelpress-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// This module implements the builder pattern for the CoreConfig structure,
// providing a fluent API for creating and configuring CoreConfig instances.
//
// The only field whose default depends on another is `max_width`: when it is
// not set explicitly it follows the selected encode profile.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::{CoreConfig, EncodeProfile};

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use reelpress_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .video_dir("frontend/video")
///     .target_size_mb(8.0)
///     .max_width(1920)
///     .backup_originals(false)
///     .build();
///
/// assert_eq!(config.max_width, 1920);
/// assert!(!config.backup_originals);
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfigBuilder {
    video_dir: PathBuf,
    file_list: Option<Vec<String>>,
    poster_dir: Option<PathBuf>,
    target_size_mb: f64,
    max_width: Option<u32>,
    profile: EncodeProfile,
    backup_originals: bool,
    generate_posters: bool,
    poster_offset: String,
    poster_max_width: Option<u32>,
}

impl Default for CoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        let defaults = CoreConfig::default();
        Self {
            video_dir: defaults.video_dir,
            file_list: defaults.file_list,
            poster_dir: defaults.poster_dir,
            target_size_mb: defaults.target_size_mb,
            max_width: None,
            profile: defaults.profile,
            backup_originals: defaults.backup_originals,
            generate_posters: defaults.generate_posters,
            poster_offset: defaults.poster_offset,
            poster_max_width: defaults.poster_max_width,
        }
    }

    /// Sets the directory containing the videos.
    pub fn video_dir(mut self, video_dir: impl Into<PathBuf>) -> Self {
        self.video_dir = video_dir.into();
        self
    }

    /// Restricts the run to a fixed list of file names inside the video directory.
    pub fn file_list(mut self, names: Vec<String>) -> Self {
        self.file_list = Some(names);
        self
    }

    /// Sets the directory for poster images.
    pub fn poster_dir(mut self, poster_dir: impl Into<PathBuf>) -> Self {
        self.poster_dir = Some(poster_dir.into());
        self
    }

    /// Sets the target output size in megabytes.
    pub fn target_size_mb(mut self, size_mb: f64) -> Self {
        self.target_size_mb = size_mb;
        self
    }

    /// Overrides the profile's default width limit.
    pub fn max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    /// Selects the encoder parameter set.
    pub fn profile(mut self, profile: EncodeProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets whether originals are copied to `<stem>_original<ext>` first.
    pub fn backup_originals(mut self, enabled: bool) -> Self {
        self.backup_originals = enabled;
        self
    }

    /// Sets whether poster images are generated.
    pub fn generate_posters(mut self, enabled: bool) -> Self {
        self.generate_posters = enabled;
        self
    }

    /// Sets the poster frame timestamp (HH:MM:SS).
    pub fn poster_offset(mut self, offset: impl Into<String>) -> Self {
        self.poster_offset = offset.into();
        self
    }

    /// Sets the poster width limit; `None` keeps the source width.
    pub fn poster_max_width(mut self, width: Option<u32>) -> Self {
        self.poster_max_width = width;
        self
    }

    /// Builds a CoreConfig instance from the builder.
    ///
    /// The result is not validated; call [`CoreConfig::validate`] before use.
    pub fn build(self) -> CoreConfig {
        CoreConfig {
            video_dir: self.video_dir,
            file_list: self.file_list,
            poster_dir: self.poster_dir,
            target_size_mb: self.target_size_mb,
            max_width: self
                .max_width
                .unwrap_or_else(|| self.profile.default_max_width()),
            profile: self.profile,
            backup_originals: self.backup_originals,
            generate_posters: self.generate_posters,
            poster_offset: self.poster_offset,
            poster_max_width: self.poster_max_width,
        }
    }
}
