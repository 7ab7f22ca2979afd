//! FFmpeg command builder utilities
//!
//! This module provides a builder pattern for constructing FFmpeg commands
//! with the options shared by every invocation (the binary to run, banner
//! suppression and overwrite of the output) plus the video filter chain.

use crate::processing::plan::Resolution;
use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::PathBuf;

/// Builder for creating `FFmpeg` commands with common configurations
#[derive(Default)]
pub struct FfmpegCommandBuilder {
    binary: Option<PathBuf>,
}

impl FfmpegCommandBuilder {
    /// Creates a new `FFmpeg` command builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a specific ffmpeg binary instead of the one ffmpeg-sidecar resolves
    #[must_use]
    pub fn with_binary(mut self, binary: PathBuf) -> Self {
        self.binary = Some(binary);
        self
    }

    /// Builds the `FFmpeg` command with banner suppression and `-y`
    #[must_use]
    pub fn build(self) -> FfmpegCommand {
        let mut cmd = match self.binary {
            Some(binary) => FfmpegCommand::new_with_path(binary),
            None => FfmpegCommand::new(),
        };
        cmd.arg("-hide_banner");
        cmd.arg("-y");
        cmd
    }
}

/// Builder for constructing video filter chains
#[derive(Default)]
pub struct VideoFilterChain {
    filters: Vec<String>,
}

impl VideoFilterChain {
    /// Creates a new empty filter chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exact scale filter. The height is lowered to an even value
    /// since 4:2:0 chroma subsampling rejects odd dimensions.
    #[must_use]
    pub fn add_scale(mut self, target: Option<Resolution>) -> Self {
        if let Some(resolution) = target {
            self.filters.push(format!(
                "scale={}:{}",
                even_dimension(resolution.width),
                even_dimension(resolution.height)
            ));
        }
        self
    }

    /// Adds a width cap that keeps the aspect ratio and an even height
    #[must_use]
    pub fn add_max_width(mut self, max_width: Option<u32>) -> Self {
        if let Some(width) = max_width {
            self.filters.push(format!("scale='min({width},iw)':-2"));
        }
        self
    }

    /// Rounds both dimensions down to even values when no other scale
    /// filter is in the chain
    #[must_use]
    pub fn ensure_even_dimensions(mut self) -> Self {
        if !self.filters.iter().any(|f| f.starts_with("scale=")) {
            self.filters.push("scale=trunc(iw/2)*2:trunc(ih/2)*2".to_string());
        }
        self
    }

    /// Builds the filter chain into a single filter string
    #[must_use]
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

/// Rounds a dimension down to the nearest even value, never below 2.
#[must_use]
pub fn even_dimension(value: u32) -> u32 {
    (value & !1).max(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chain_builds_none() {
        assert_eq!(VideoFilterChain::new().add_scale(None).add_max_width(None).build(), None);
    }

    #[test]
    fn scale_uses_even_height() {
        let chain = VideoFilterChain::new()
            .add_scale(Some(Resolution { width: 1280, height: 721 }))
            .build();
        assert_eq!(chain.as_deref(), Some("scale=1280:720"));
    }

    #[test]
    fn even_dimensions_without_scale() {
        let chain = VideoFilterChain::new().add_scale(None).ensure_even_dimensions().build();
        assert_eq!(chain.as_deref(), Some("scale=trunc(iw/2)*2:trunc(ih/2)*2"));
    }

    #[test]
    fn even_dimensions_keep_existing_scale() {
        let chain = VideoFilterChain::new()
            .add_scale(Some(Resolution { width: 720, height: 404 }))
            .ensure_even_dimensions()
            .build();
        assert_eq!(chain.as_deref(), Some("scale=720:404"));
    }

    #[test]
    fn even_dimension_rounds_down() {
        assert_eq!(even_dimension(405), 404);
        assert_eq!(even_dimension(720), 720);
        assert_eq!(even_dimension(1), 2);
    }

    #[test]
    fn builder_adds_common_flags() {
        let cmd = FfmpegCommandBuilder::new().build();
        let args: Vec<String> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert!(args.iter().any(|a| a == "-hide_banner"));
        assert!(args.iter().any(|a| a == "-y"));
    }
}
