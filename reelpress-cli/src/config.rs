// reelpress-cli/src/config.rs
//
// Defines default configuration constants for the `reelpress-cli` application.
// Encoding defaults live in `reelpress_core::config`.

/// Directory that receives a downloaded ffmpeg build.
pub const DEFAULT_TOOLS_DIR: &str = "ffmpeg_bin";

/// Directory for run logs.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Prefix of run log file names.
pub const RUN_LOG_PREFIX: &str = "reelpress_run";
