//! Implementation of the 'plan' subcommand.
//!
//! Probes each selected video and prints the bitrate and resize the compress
//! command would use, without encoding or touching any file.

use crate::cli::PlanArgs;
use crate::commands::{config_builder, discover_files};
use crate::error::CliResult;

use reelpress_core::external::{CrateFfprobeExecutor, StdFsMetadataProvider, companion_ffprobe};
use reelpress_core::terminal_output::{print_error, print_processing, print_section, print_status};
use reelpress_core::utils::get_filename_safe;
use reelpress_core::{CoreError, PlannedVideo, format_bytes, format_duration, plan_videos};

/// Probes and plans the selected videos, printing text or JSON.
pub fn run_plan(args: PlanArgs) -> CliResult<()> {
    let config = config_builder(&args.selection).build();
    config.validate()?;
    let files = discover_files(&config)?;

    let ffprobe = match &args.selection.ffmpeg {
        Some(ffmpeg) => CrateFfprobeExecutor::with_binary(companion_ffprobe(ffmpeg)),
        None => CrateFfprobeExecutor::new(),
    };

    let planned = plan_videos(&ffprobe, &StdFsMetadataProvider, &config, &files)?;

    if args.json {
        let json = serde_json::to_string_pretty(&planned)
            .map_err(|e| CoreError::JsonParse(format!("Failed to serialize plans: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    print_section("Compression plan");
    print_status("Profile", &config.profile.to_string(), false);
    print_status("Target size", &format!("{} MB", config.target_size_mb), false);
    print_status("Max width", &format!("{}px", config.max_width), false);
    for entry in &planned {
        print_entry(entry);
    }
    Ok(())
}

fn print_entry(entry: &PlannedVideo) {
    let name = get_filename_safe(&entry.path).unwrap_or_else(|_| entry.path.display().to_string());
    print_processing(&name);

    if let Some(descriptor) = &entry.descriptor {
        print_status("Size", &format_bytes(descriptor.size_bytes), false);
        print_status("Duration", &format_duration(descriptor.duration_secs), false);
        print_status(
            "Resolution",
            &format!("{}x{}", descriptor.width, descriptor.height),
            false,
        );
    }
    if let Some(plan) = &entry.plan {
        print_status("Target bitrate", &plan.bitrate_arg(), true);
        let resize = plan
            .resize_to
            .map_or_else(|| "no".to_string(), |resolution| resolution.to_string());
        print_status("Resize", &resize, false);
    }
    if let Some(error) = &entry.error {
        print_error(error);
    }
}
