//! FFmpeg command building and execution for compression and posters
//!
//! This module turns a `CompressionPlan` into an H.264/AAC encode command for
//! the selected profile, builds the single-frame poster command, and runs
//! both through an `FfmpegSpawner`, rendering progress and collecting the
//! error lines ffmpeg prints so a failure can be reported meaningfully.

use crate::config::EncodeProfile;
use crate::error::{CoreResult, command_failed_error};
use crate::external::ffmpeg_builder::{FfmpegCommandBuilder, VideoFilterChain};
use crate::external::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use crate::processing::plan::CompressionPlan;
use crate::terminal_output;
use crate::utils::parse_ffmpeg_time;

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use log::debug;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Number of ffmpeg error lines kept for failure reports.
const STDERR_TAIL_LINES: usize = 20;

/// Parameters required for running a compression encode.
#[derive(Debug, Clone)]
pub struct EncodeParams {
    pub ffmpeg_binary: PathBuf,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub profile: EncodeProfile,
    pub plan: CompressionPlan,
    /// Source duration, used to render progress
    pub duration_secs: f64,
}

/// Parameters required for extracting a poster frame.
#[derive(Debug, Clone)]
pub struct PosterParams {
    pub ffmpeg_binary: PathBuf,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Timestamp of the frame (HH:MM:SS)
    pub offset: String,
    pub max_width: Option<u32>,
}

/// Builds the compression command for `params.profile`.
///
/// # Examples
///
/// ```rust
/// use reelpress_core::config::EncodeProfile;
/// use reelpress_core::external::{EncodeParams, build_compress_command};
/// use reelpress_core::processing::plan::CompressionPlan;
///
/// let params = EncodeParams {
///     ffmpeg_binary: "ffmpeg".into(),
///     input_path: "IMG_7651.mp4".into(),
///     output_path: "IMG_7651_compressed.mp4".into(),
///     profile: EncodeProfile::TargetSize,
///     plan: CompressionPlan { target_bitrate_kbps: 546, resize_to: None },
///     duration_secs: 60.0,
/// };
///
/// let cmd = build_compress_command(&params);
/// let args: Vec<String> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
/// assert!(args.windows(2).any(|w| w[0] == "-b:v" && w[1] == "546k"));
/// assert_eq!(args.last().map(String::as_str), Some("IMG_7651_compressed.mp4"));
/// ```
#[must_use]
pub fn build_compress_command(params: &EncodeParams) -> FfmpegCommand {
    let mut cmd = FfmpegCommandBuilder::new()
        .with_binary(params.ffmpeg_binary.clone())
        .build();
    cmd.input(params.input_path.to_string_lossy().as_ref());

    cmd.args(["-c:v", "libx264"]);
    match params.profile {
        EncodeProfile::TargetSize => {
            cmd.args(["-b:v", &params.plan.bitrate_arg()]);
            cmd.args(["-preset", "medium"]);
            cmd.args(["-crf", "28"]);
        }
        EncodeProfile::MobileFriendly => {
            cmd.args(["-profile:v", "main"]);
            cmd.args(["-level", "3.1"]);
            cmd.args(["-pix_fmt", "yuv420p"]);
            cmd.args(["-preset", "medium"]);
            cmd.args(["-crf", "23"]);
        }
    }

    let mut filters = VideoFilterChain::new().add_scale(params.plan.resize_to);
    if params.profile == EncodeProfile::MobileFriendly {
        // yuv420p needs even dimensions even when the source is not resized
        filters = filters.ensure_even_dimensions();
    }
    if let Some(filters) = filters.build() {
        cmd.args(["-vf", &filters]);
    }

    cmd.args(["-c:a", "aac"]);
    if params.profile == EncodeProfile::MobileFriendly {
        cmd.args(["-b:a", "128k"]);
    }

    cmd.args(["-movflags", "+faststart"]);
    cmd.output(params.output_path.to_string_lossy().as_ref());
    cmd
}

/// Builds the poster extraction command.
#[must_use]
pub fn build_poster_command(params: &PosterParams) -> FfmpegCommand {
    let mut cmd = FfmpegCommandBuilder::new()
        .with_binary(params.ffmpeg_binary.clone())
        .build();
    cmd.input(params.input_path.to_string_lossy().as_ref());
    cmd.args(["-ss", &params.offset]);
    cmd.args(["-frames:v", "1"]);
    cmd.args(["-q:v", "2"]);

    if let Some(filters) = VideoFilterChain::new()
        .add_max_width(params.max_width)
        .build()
    {
        cmd.args(["-vf", &filters]);
    }

    cmd.output(params.output_path.to_string_lossy().as_ref());
    cmd
}

/// Runs the compression encode to completion.
///
/// The caller owns cleanup: on error the output path may hold a partial file.
pub fn run_compress<S: FfmpegSpawner>(spawner: &S, params: &EncodeParams) -> CoreResult<()> {
    debug!("Encode parameters: {params:?}");
    let cmd = build_compress_command(params);
    debug!("FFmpeg command: {cmd:?}");

    let duration = params.duration_secs;
    let result = run_to_completion(spawner, cmd, "ffmpeg (compress)", |elapsed, speed| {
        terminal_output::print_progress_bar(elapsed, duration, speed);
    });
    terminal_output::clear_progress_bar();
    result
}

/// Extracts a single poster frame.
pub fn run_poster<S: FfmpegSpawner>(spawner: &S, params: &PosterParams) -> CoreResult<()> {
    let cmd = build_poster_command(params);
    debug!("FFmpeg poster command: {cmd:?}");
    run_to_completion(spawner, cmd, "ffmpeg (poster)", |_, _| {})?;

    if !params.output_path.is_file() {
        return Err(command_failed_error(
            "ffmpeg (poster)",
            std::process::ExitStatus::default(),
            format!("no image written to {}", params.output_path.display()),
        ));
    }
    Ok(())
}

fn run_to_completion<S, F>(spawner: &S, cmd: FfmpegCommand, label: &str, mut on_progress: F) -> CoreResult<()>
where
    S: FfmpegSpawner,
    F: FnMut(f64, Option<f32>),
{
    let mut process = spawner.spawn(cmd)?;
    let mut stderr_tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL_LINES);

    process.handle_events(|event| {
        match event {
            FfmpegEvent::Progress(progress) => {
                if let Some(elapsed) = parse_ffmpeg_time(&progress.time) {
                    on_progress(elapsed, Some(progress.speed));
                }
            }
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) | FfmpegEvent::Error(line) => {
                debug!("{label}: {line}");
                if stderr_tail.len() == STDERR_TAIL_LINES {
                    stderr_tail.pop_front();
                }
                stderr_tail.push_back(line);
            }
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;
    if !status.success() {
        let stderr = Vec::from(stderr_tail).join("\n");
        return Err(command_failed_error(label, status, stderr));
    }
    Ok(())
}

/// Returns the file name of `path` for log lines.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
