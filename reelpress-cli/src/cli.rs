// reelpress-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use reelpress_core::EncodeProfile;
use reelpress_core::config::DEFAULT_VIDEO_DIR;
use std::path::PathBuf;

use crate::config::{DEFAULT_LOG_DIR, DEFAULT_TOOLS_DIR};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Reelpress: gallery video compressor",
    long_about = "Compresses the videos of a web gallery in place with ffmpeg, \
                  targeting a fixed file size and maximum width, and optionally \
                  extracts a poster frame for each video."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output on the console and in the run log
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Directory for run log files
    #[arg(long, global = true, value_name = "LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compresses every video in a directory and replaces the originals
    Compress(CompressArgs),
    /// Probes the videos and prints the compression plan without encoding
    Plan(PlanArgs),
}

/// Encoder parameter set selectable on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProfileArg {
    /// Fixed bitrate derived from the target size (1280px wide at most)
    #[default]
    TargetSize,
    /// Main profile level 3.1 for older phones (720px wide at most)
    Mobile,
}

impl From<ProfileArg> for EncodeProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::TargetSize => EncodeProfile::TargetSize,
            ProfileArg::Mobile => EncodeProfile::MobileFriendly,
        }
    }
}

/// Options shared by `compress` and `plan`.
#[derive(Args, Debug)]
pub struct SelectionArgs {
    /// Directory containing the .mp4 videos
    #[arg(value_name = "VIDEO_DIR", default_value = DEFAULT_VIDEO_DIR)]
    pub video_dir: PathBuf,

    /// Optional: Only process these file names (comma-separated) inside VIDEO_DIR
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    pub files: Option<Vec<String>>,

    /// Encoder parameter set
    #[arg(long, value_enum, default_value_t = ProfileArg::TargetSize)]
    pub profile: ProfileArg,

    /// Target size of each compressed video in megabytes
    #[arg(long, value_name = "MB")]
    pub target_size_mb: Option<f64>,

    /// Optional: Override the maximum output width (defaults to the profile's limit)
    #[arg(long, value_name = "PIXELS")]
    pub max_width: Option<u32>,

    /// Optional: Path to the ffmpeg binary to use
    #[arg(long, value_name = "PATH", env = "REELPRESS_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompressArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Extract a poster image for each video
    #[arg(long, default_value_t = false)]
    pub posters: bool,

    /// Optional: Directory for poster images (defaults to VIDEO_DIR/../img)
    #[arg(long, value_name = "DIR")]
    pub poster_dir: Option<PathBuf>,

    /// Timestamp of the poster frame
    #[arg(long, value_name = "HH:MM:SS")]
    pub poster_offset: Option<String>,

    /// Optional: Maximum poster width in pixels
    #[arg(long, value_name = "PIXELS")]
    pub poster_max_width: Option<u32>,

    /// Do not keep a `<name>_original.mp4` copy of each video
    #[arg(long, default_value_t = false)]
    pub no_backup: bool,

    /// Download a static ffmpeg build into TOOLS_DIR if it is not there yet
    #[arg(long, default_value_t = false, conflicts_with = "ffmpeg")]
    pub download_ffmpeg: bool,

    /// Directory holding the downloaded ffmpeg build
    #[arg(long, value_name = "TOOLS_DIR", default_value = DEFAULT_TOOLS_DIR)]
    pub tools_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Print the plans as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
