// ============================================================================
// reelpress-core/src/processing/batch.rs
// ============================================================================
//
// BATCH DRIVER: Sequential Compression of a Video Directory
//
// This module houses the orchestration logic of a compression run. Files are
// handled strictly one after another:
//
// 1. Skip files whose name marks them as already processed
// 2. Probe the source into a VideoDescriptor
// 3. Plan bitrate and resize
// 4. Back up the original (optional)
// 5. Encode into `<stem>_compressed<ext>`
// 6. Move the output over the original, or delete it on failure
// 7. Extract a poster frame (optional)
//
// Per-file failures are reported and counted; only setup errors (see
// `CoreError::is_fatal`) abort the run.

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::discovery::is_processed_name;
use crate::error::{CoreResult, command_failed_error};
use crate::external::ffmpeg::display_name;
use crate::external::{
    EncodeParams, FfmpegSpawner, FfprobeExecutor, FileMetadataProvider, PosterParams, run_compress,
    run_poster,
};
use crate::processing::plan::{CompressionPlan, VideoDescriptor, plan};
use crate::processing::replace::{Backup, create_backup, replace_original};
use crate::temp_files::{compressed_output_path, poster_path, remove_partial_output};
use crate::terminal_output::{
    print_error, print_processing, print_section, print_status, print_success, print_warning,
};
use crate::utils::{calculate_size_reduction, format_duration, get_filename_safe};
use crate::{BatchSummary, EncodeResult};

// ---- External crate imports ----
use log::debug;
use serde::Serialize;

// ---- Standard library imports ----
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Instant;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

// ============================================================================
// MAIN PROCESSING FUNCTION
// ============================================================================

/// Compresses each file in `files_to_process` according to `config`.
///
/// Generic over its collaborators so tests can replace ffmpeg, ffprobe and
/// file metadata access:
/// - `S`: FfmpegSpawner - runs the encode and poster commands
/// - `P`: FfprobeExecutor - probes the source video
/// - `M`: FileMetadataProvider - reads file sizes
///
/// # Returns
///
/// * `Ok(BatchSummary)` - Once every file was attempted, whatever the per-file outcome
/// * `Err(CoreError)` - If a setup error (e.g. a vanished encoder) makes continuing pointless
///
/// # Examples
///
/// ```rust,no_run
/// use reelpress_core::{CoreConfig, find_processable_files, process_videos};
/// use reelpress_core::external::{
///     CrateFfprobeExecutor, EncoderProvider, SidecarSpawner, StdFsMetadataProvider, SystemEncoder,
///     companion_ffprobe,
/// };
/// use std::path::PathBuf;
///
/// let config = CoreConfig::new(PathBuf::from("frontend/video"));
/// let ffmpeg = SystemEncoder.ensure_available().unwrap();
/// let files = find_processable_files(&config.video_dir).unwrap();
///
/// let summary = process_videos(
///     &SidecarSpawner,
///     &CrateFfprobeExecutor::with_binary(companion_ffprobe(&ffmpeg)),
///     &StdFsMetadataProvider,
///     &config,
///     &ffmpeg,
///     &files,
/// ).unwrap();
/// println!("{} compressed, {} failed", summary.results.len(), summary.failed.len());
/// ```
pub fn process_videos<S: FfmpegSpawner, P: FfprobeExecutor, M: FileMetadataProvider>(
    spawner: &S,
    ffprobe_executor: &P,
    metadata_provider: &M,
    config: &CoreConfig,
    ffmpeg_binary: &Path,
    files_to_process: &[PathBuf],
) -> CoreResult<BatchSummary> {
    print_section("Compression");
    print_status("Videos", &files_to_process.len().to_string(), true);
    print_status("Profile", &config.profile.to_string(), false);
    print_status("Target size", &format!("{} MB", config.target_size_mb), false);
    print_status("Max width", &format!("{}px", config.max_width), false);

    let mut summary = BatchSummary::default();

    for input_path in files_to_process {
        let filename = display_name(input_path);

        if is_processed_name(input_path) {
            print_warning(&format!("Skipping: {filename} (already processed)"));
            summary.skipped.push(filename);
            continue;
        }

        print_processing(&format!("Processing: {filename}"));
        let outcome = match compress_file(
            spawner,
            ffprobe_executor,
            metadata_provider,
            config,
            ffmpeg_binary,
            input_path,
        ) {
            Err(e) if e.is_fatal() => return Err(e),
            other => other,
        };

        // The poster is taken from whatever now sits at `input_path`: the
        // compressed file on success, the untouched original otherwise.
        let poster = if config.generate_posters {
            match generate_poster(spawner, config, ffmpeg_binary, input_path) {
                Ok(path) => Some(path),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    print_error(&format!("Poster generation failed for {filename}: {e}"));
                    None
                }
            }
        } else {
            None
        };

        match outcome {
            Ok(mut result) => {
                result.poster = poster;
                summary.results.push(result);
            }
            Err(e) => {
                print_error(&format!("Compression failed for {filename}: {e}"));
                summary.failed.push(filename);
            }
        }
    }

    Ok(summary)
}

fn compress_file<S: FfmpegSpawner, P: FfprobeExecutor, M: FileMetadataProvider>(
    spawner: &S,
    ffprobe_executor: &P,
    metadata_provider: &M,
    config: &CoreConfig,
    ffmpeg_binary: &Path,
    input_path: &Path,
) -> CoreResult<EncodeResult> {
    let file_start_time = Instant::now();

    let descriptor = describe(ffprobe_executor, metadata_provider, input_path)?;
    print_status("Original size", &format_mb(descriptor.size_bytes), false);
    print_status(
        "Source",
        &format!(
            "{}x{}, {}",
            descriptor.width,
            descriptor.height,
            format_duration(descriptor.duration_secs)
        ),
        false,
    );

    let plan = plan(&descriptor, config.target_size_mb, config.max_width)?;
    report_plan(&plan);

    if config.backup_originals {
        match create_backup(input_path)? {
            Backup::Created(path) => print_status("Backup created", &display_name(&path), false),
            Backup::Existing(path) => print_status("Backup kept", &display_name(&path), false),
        }
    }

    let output_path = compressed_output_path(input_path)?;
    let params = EncodeParams {
        ffmpeg_binary: ffmpeg_binary.to_path_buf(),
        input_path: input_path.to_path_buf(),
        output_path: output_path.clone(),
        profile: config.profile,
        plan,
        duration_secs: descriptor.duration_secs,
    };

    print_status("Compressing", "this may take a minute", false);
    if let Err(e) = run_compress(spawner, &params) {
        remove_partial_output(&output_path);
        return Err(e);
    }

    if !output_path.is_file() {
        return Err(command_failed_error(
            "ffmpeg (compress)",
            ExitStatus::default(),
            format!("no output written to {}", output_path.display()),
        ));
    }

    let output_size = match metadata_provider.get_size(&output_path) {
        Ok(size) => size,
        Err(e) => {
            remove_partial_output(&output_path);
            return Err(e);
        }
    };

    replace_original(input_path, &output_path)?;

    print_status("Compressed size", &format_mb(output_size), true);
    print_status(
        "Reduction",
        &format!("{:.1}%", calculate_size_reduction(descriptor.size_bytes, output_size)),
        false,
    );
    print_success("Compression complete!");

    Ok(EncodeResult {
        filename: get_filename_safe(input_path)?,
        duration: file_start_time.elapsed(),
        input_size: descriptor.size_bytes,
        output_size,
        resized_to: plan.resize_to,
        poster: None,
    })
}

fn describe<P: FfprobeExecutor, M: FileMetadataProvider>(
    ffprobe_executor: &P,
    metadata_provider: &M,
    input_path: &Path,
) -> CoreResult<VideoDescriptor> {
    let size_bytes = metadata_provider.get_size(input_path)?;
    let properties = ffprobe_executor.get_video_properties(input_path)?;
    debug!("Probed {}: {properties:?}", input_path.display());

    Ok(VideoDescriptor {
        path: input_path.to_path_buf(),
        duration_secs: properties.duration_secs,
        width: properties.width,
        height: properties.height,
        size_bytes,
    })
}

fn report_plan(plan: &CompressionPlan) {
    print_status("Target bitrate", &plan.bitrate_arg(), false);
    if let Some(resolution) = plan.resize_to {
        print_status("Resized to", &resolution.to_string(), false);
    }
}

fn generate_poster<S: FfmpegSpawner>(
    spawner: &S,
    config: &CoreConfig,
    ffmpeg_binary: &Path,
    input_path: &Path,
) -> CoreResult<PathBuf> {
    let poster_dir = config.effective_poster_dir();
    fs::create_dir_all(&poster_dir)?;
    let output_path = poster_path(input_path, &poster_dir)?;

    run_poster(
        spawner,
        &PosterParams {
            ffmpeg_binary: ffmpeg_binary.to_path_buf(),
            input_path: input_path.to_path_buf(),
            output_path: output_path.clone(),
            offset: config.poster_offset.clone(),
            max_width: config.poster_max_width,
        },
    )?;

    print_success(&format!("Generated poster: {}", display_name(&output_path)));
    Ok(output_path)
}

// ============================================================================
// DRY RUN
// ============================================================================

/// Probe and plan outcome for one file, without encoding.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedVideo {
    pub path: PathBuf,
    pub descriptor: Option<VideoDescriptor>,
    pub plan: Option<CompressionPlan>,
    pub error: Option<String>,
}

/// Probes and plans every file without touching it.
///
/// Files with a processed-name marker are left out. Per-file probe or plan
/// failures are recorded in the entry; setup errors are returned.
pub fn plan_videos<P: FfprobeExecutor, M: FileMetadataProvider>(
    ffprobe_executor: &P,
    metadata_provider: &M,
    config: &CoreConfig,
    files_to_process: &[PathBuf],
) -> CoreResult<Vec<PlannedVideo>> {
    let mut planned = Vec::with_capacity(files_to_process.len());

    for input_path in files_to_process.iter().filter(|path| !is_processed_name(path)) {
        let entry = match describe(ffprobe_executor, metadata_provider, input_path) {
            Ok(descriptor) => match plan(&descriptor, config.target_size_mb, config.max_width) {
                Ok(plan) => PlannedVideo {
                    path: input_path.clone(),
                    descriptor: Some(descriptor),
                    plan: Some(plan),
                    error: None,
                },
                Err(e) => PlannedVideo {
                    path: input_path.clone(),
                    descriptor: Some(descriptor),
                    plan: None,
                    error: Some(e.to_string()),
                },
            },
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => PlannedVideo {
                path: input_path.clone(),
                descriptor: None,
                plan: None,
                error: Some(e.to_string()),
            },
        };
        planned.push(entry);
    }

    Ok(planned)
}
