//! FFprobe integration for reading video properties.
//!
//! The probe runs the ffprobe binary that belongs to the selected encoder
//! (which may be a downloaded copy rather than the one on `PATH`) and decodes
//! its JSON output into the typed model of the `ffprobe` crate.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use ffprobe::FfProbe;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Properties of the first video stream of a file.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VideoProperties {
    pub width: u32,
    pub height: u32,
    pub duration_secs: f64,
}

/// Trait for reading video properties from a media file.
pub trait FfprobeExecutor {
    /// Probes `input_path` for the dimensions and duration of its video stream.
    fn get_video_properties(&self, input_path: &Path) -> CoreResult<VideoProperties>;
}

/// `FfprobeExecutor` backed by an ffprobe binary.
#[derive(Debug, Clone)]
pub struct CrateFfprobeExecutor {
    binary: PathBuf,
}

impl Default for CrateFfprobeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CrateFfprobeExecutor {
    /// Uses the `ffprobe` found on `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_binary(PathBuf::from("ffprobe"))
    }

    /// Uses a specific ffprobe binary.
    #[must_use]
    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    fn run(&self, input_path: &Path) -> CoreResult<FfProbe> {
        let output = Command::new(&self.binary)
            .args(["-v", "quiet", "-show_format", "-show_streams", "-print_format", "json"])
            .arg(input_path)
            .output()
            .map_err(|e| command_start_error(self.binary.display().to_string(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::error!(
                "ffprobe failed for {}: {}",
                input_path.display(),
                output.status
            );
            return Err(command_failed_error("ffprobe", output.status, stderr));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            CoreError::JsonParse(format!(
                "ffprobe output for {}: {e}",
                input_path.display()
            ))
        })
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn get_video_properties(&self, input_path: &Path) -> CoreResult<VideoProperties> {
        log::debug!(
            "Running {} for video properties on: {}",
            self.binary.display(),
            input_path.display()
        );
        let metadata = self.run(input_path)?;

        let video_stream = metadata
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| {
                CoreError::VideoInfo(format!("No video stream found in {}", input_path.display()))
            })?;

        properties_from_fields(
            input_path,
            metadata.format.duration.as_deref(),
            video_stream.width,
            video_stream.height,
        )
    }
}

/// Validates the raw ffprobe fields of a video stream.
///
/// A zero duration is accepted here; rejecting it is the planner's job.
pub fn properties_from_fields(
    input_path: &Path,
    duration: Option<&str>,
    width: Option<i64>,
    height: Option<i64>,
) -> CoreResult<VideoProperties> {
    let duration_secs = duration
        .and_then(|d| d.trim().parse::<f64>().ok())
        .ok_or_else(|| {
            CoreError::FfprobeParse(format!(
                "Failed to parse duration from format for {}",
                input_path.display()
            ))
        })?;

    let width = width.ok_or_else(|| {
        CoreError::VideoInfo(format!("Video stream missing width in {}", input_path.display()))
    })?;
    let height = height.ok_or_else(|| {
        CoreError::VideoInfo(format!("Video stream missing height in {}", input_path.display()))
    })?;

    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(CoreError::VideoInfo(format!(
            "Invalid dimensions found in {}: width={}, height={}",
            input_path.display(),
            width,
            height
        )));
    };

    Ok(VideoProperties {
        width,
        height,
        duration_secs,
    })
}
