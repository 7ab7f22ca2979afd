//! Implementation of the 'compress' subcommand.
//!
//! This module resolves the videos to work on, provisions the ffmpeg binary,
//! hands the batch to the reelpress-core driver and reports the outcome.

use crate::cli::CompressArgs;
use crate::commands::{config_builder, discover_files};
use crate::error::CliResult;

use reelpress_core::external::{
    ConfiguredEncoder, CrateFfprobeExecutor, DownloadingEncoder, EncoderProvider, SidecarSpawner,
    StdFsMetadataProvider, SystemEncoder, companion_ffprobe,
};
use reelpress_core::terminal_output::{
    print_error, print_section, print_status, print_sub_item, print_success, print_warning,
};
use reelpress_core::{BatchSummary, CoreConfig, format_bytes, format_duration, process_videos};

use log::debug;

use std::path::Path;
use std::time::Instant;

/// Creates and validates the core configuration from CLI arguments.
pub fn create_core_config(args: &CompressArgs) -> CliResult<CoreConfig> {
    let mut builder = config_builder(&args.selection)
        .backup_originals(!args.no_backup)
        .generate_posters(args.posters);

    if let Some(dir) = &args.poster_dir {
        builder = builder.poster_dir(dir.clone());
    }
    if let Some(offset) = &args.poster_offset {
        builder = builder.poster_offset(offset.clone());
    }
    if let Some(width) = args.poster_max_width {
        builder = builder.poster_max_width(Some(width));
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}

/// Picks where the ffmpeg binary comes from.
///
/// An explicit path wins; `--download-ffmpeg` fetches a build into the tools
/// directory; a build downloaded by an earlier run is reused; otherwise the
/// `ffmpeg` on `PATH` is used.
pub fn select_encoder(args: &CompressArgs) -> Box<dyn EncoderProvider> {
    if let Some(path) = &args.selection.ffmpeg {
        return Box::new(ConfiguredEncoder::new(path.clone()));
    }

    let downloading = DownloadingEncoder::new(args.tools_dir.clone());
    if args.download_ffmpeg {
        return Box::new(downloading);
    }

    let cached = downloading.cached_binary();
    if cached.is_file() {
        debug!("Reusing downloaded ffmpeg at {}", cached.display());
        return Box::new(ConfiguredEncoder::new(cached));
    }
    Box::new(SystemEncoder)
}

/// Runs the compression batch with configured parameters and reports results.
pub fn run_compress(args: CompressArgs, log_path: &Path) -> CliResult<()> {
    let total_start_time = Instant::now();

    let config = create_core_config(&args)?;
    let files_to_process = discover_files(&config)?;

    print_section("Initialization");
    print_status("Video directory", &config.video_dir.display().to_string(), false);
    print_status("Files", &files_to_process.len().to_string(), true);
    if config.generate_posters {
        print_status(
            "Poster directory",
            &config.effective_poster_dir().display().to_string(),
            false,
        );
    }
    print_status("Run log", &log_path.display().to_string(), false);

    let ffmpeg = select_encoder(&args).ensure_available()?;
    let ffprobe = companion_ffprobe(&ffmpeg);
    print_status("FFmpeg", &ffmpeg.display().to_string(), false);
    debug!("Using ffprobe at {}", ffprobe.display());

    let summary = process_videos(
        &SidecarSpawner,
        &CrateFfprobeExecutor::with_binary(ffprobe),
        &StdFsMetadataProvider,
        &config,
        &ffmpeg,
        &files_to_process,
    )?;

    report_summary(&summary, &config);

    print_status(
        "Total time",
        &format_duration(total_start_time.elapsed().as_secs_f64()),
        true,
    );
    debug!("Finished at: {}", chrono::Local::now());
    Ok(())
}

/// Displays the per-file results, failures and follow-up hints.
fn report_summary(summary: &BatchSummary, config: &CoreConfig) {
    print_section("Summary");

    if summary.results.is_empty() {
        print_warning("No videos were compressed");
    } else {
        print_success(&format!("Compressed {} video(s)", summary.results.len()));
    }

    for result in &summary.results {
        let reduction = reelpress_core::calculate_size_reduction(result.input_size, result.output_size);
        print_sub_item(&result.filename);
        print_status("Time", &format_duration(result.duration.as_secs_f64()), false);
        print_status("Input", &format_bytes(result.input_size), false);
        print_status("Output", &format_bytes(result.output_size), true);
        print_status("Reduction", &format!("{reduction:.1}%"), true);
        if let Some(resolution) = result.resized_to {
            print_status("Resized to", &resolution.to_string(), false);
        }
        if let Some(poster) = &result.poster {
            print_status("Poster", &poster.display().to_string(), false);
        }
    }

    if !summary.skipped.is_empty() {
        print_status("Skipped", &summary.skipped.join(", "), false);
    }
    for name in &summary.failed {
        print_error(&format!("Failed: {name} (original kept)"));
    }

    if summary.results.len() > 1 {
        let saved = summary.bytes_saved();
        let saved_display = if saved >= 0 {
            format_bytes(saved.unsigned_abs())
        } else {
            format!("-{}", format_bytes(saved.unsigned_abs()))
        };
        print_status("Total saved", &saved_display, true);
    }

    if !summary.results.is_empty() {
        print_section("Next steps");
        print_sub_item("Check the compressed videos in a browser before publishing.");
        if config.backup_originals {
            print_sub_item(&format!(
                "Originals were kept as *_original.mp4 in {}; delete them once satisfied.",
                config.video_dir.display()
            ));
        }
        if config.generate_posters {
            print_sub_item(&format!(
                "Reference the posters from {} in the gallery markup.",
                config.effective_poster_dir().display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;

    fn compress_args(argv: &[&str]) -> CompressArgs {
        let mut full = vec!["reelpress", "compress"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Compress(args) => args,
            Commands::Plan(_) => panic!("Expected Compress command"),
        }
    }

    #[test]
    fn test_config_from_args() {
        let args = compress_args(&[
            "site/video",
            "--profile",
            "mobile",
            "--posters",
            "--poster-max-width",
            "480",
            "--no-backup",
        ]);
        let config = create_core_config(&args).unwrap();

        assert_eq!(config.video_dir, PathBuf::from("site/video"));
        assert_eq!(config.max_width, 720);
        assert!(config.generate_posters);
        assert_eq!(config.poster_max_width, Some(480));
        assert!(!config.backup_originals);
    }

    #[test]
    fn test_invalid_target_size_is_rejected() {
        let args = compress_args(&["--target-size-mb", "0"]);
        assert!(create_core_config(&args).is_err());
    }

    #[test]
    fn test_cached_download_is_reused() {
        let tools = tempfile::tempdir().unwrap();
        let args = compress_args(&["--tools-dir", tools.path().to_str().unwrap()]);
        let cached = DownloadingEncoder::new(tools.path().to_path_buf()).cached_binary();
        std::fs::write(&cached, b"").unwrap();

        assert_eq!(select_encoder(&args).ensure_available().unwrap(), cached);
    }
}
