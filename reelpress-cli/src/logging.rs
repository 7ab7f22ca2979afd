// ============================================================================
// reelpress-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and Run Log File
//
// The core library only emits through the `log` facade. This module installs
// the `fern` dispatcher that sends every record to two places:
//
// - the console: info lines verbatim on stdout (they are pre-styled by
//   `reelpress_core::terminal_output`), warnings and errors on stderr,
//   debug lines with a dimmed level tag
// - a run log file `<log_dir>/reelpress_run_<YYYYMMDD_HHMMSS>.log` with
//   timestamps and levels, ANSI escapes stripped
//
// `--verbose` raises both outputs from info to debug.

use crate::config::RUN_LOG_PREFIX;
use crate::error::{CliErrorContext, CliResult};

use console::style;
use log::LevelFilter;
use reelpress_core::CoreError;

use std::fs;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
///
/// Used to give every run log a unique name.
///
/// # Example
/// ```
/// let name = format!("reelpress_run_{}.log", reelpress_cli::logging::get_timestamp());
/// assert!(name.ends_with(".log"));
/// ```
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Path of the run log for a run started now.
pub fn run_log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!("{RUN_LOG_PREFIX}_{}.log", get_timestamp()))
}

/// Installs the global logger and returns the path of the run log file.
pub fn init_logging(log_dir: &Path, verbose: bool) -> CliResult<PathBuf> {
    fs::create_dir_all(log_dir)
        .cli_with_context(|| format!("Failed to create log directory '{}'", log_dir.display()))?;

    let log_path = run_log_path(log_dir);
    let log_file = fern::log_file(&log_path)
        .cli_with_context(|| format!("Failed to create log file '{}'", log_path.display()))?;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let console_info = fern::Dispatch::new()
        .filter(|metadata| metadata.level() == log::Level::Info)
        .format(|out, message, _record| out.finish(format_args!("{message}")))
        .chain(std::io::stdout());

    let console_debug = fern::Dispatch::new()
        .filter(|metadata| metadata.level() > log::Level::Info)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {message}",
                style(format!("[{}]", record.level())).dim()
            ))
        })
        .chain(std::io::stdout());

    let console_problems = fern::Dispatch::new()
        .filter(|metadata| metadata.level() <= log::Level::Warn)
        .format(|out, message, _record| out.finish(format_args!("{message}")))
        .chain(std::io::stderr());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            let plain = strip_ansi_escapes::strip_str(message.to_string());
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                plain
            ))
        })
        .chain(log_file);

    fern::Dispatch::new()
        .level(level)
        .level_for("ureq", LevelFilter::Warn)
        .level_for("rustls", LevelFilter::Warn)
        .chain(console_info)
        .chain(console_debug)
        .chain(console_problems)
        .chain(file)
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to install logger: {e}")))?;

    Ok(log_path)
}
