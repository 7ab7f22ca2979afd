//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command. The
//! helpers here turn the shared selection options into a core configuration
//! and the list of files to work on.

/// Module containing the implementation of the `compress` command.
pub mod compress;

/// Module containing the implementation of the `plan` command (dry run).
pub mod plan;

use crate::cli::SelectionArgs;
use crate::error::CliResult;

use reelpress_core::{CoreConfig, CoreConfigBuilder, find_processable_files, resolve_file_list};

use std::path::PathBuf;

/// Starts a configuration builder from the options shared by all commands.
pub(crate) fn config_builder(selection: &SelectionArgs) -> CoreConfigBuilder {
    let mut builder = CoreConfigBuilder::new()
        .video_dir(selection.video_dir.clone())
        .profile(selection.profile.into());

    if let Some(names) = &selection.files {
        builder = builder.file_list(names.clone());
    }
    if let Some(size_mb) = selection.target_size_mb {
        builder = builder.target_size_mb(size_mb);
    }
    if let Some(width) = selection.max_width {
        builder = builder.max_width(width);
    }
    builder
}

/// Lists the files a run works on: the fixed list when one was given,
/// otherwise every video in the directory.
pub(crate) fn discover_files(config: &CoreConfig) -> CliResult<Vec<PathBuf>> {
    match &config.file_list {
        Some(names) => resolve_file_list(&config.video_dir, names),
        None => find_processable_files(&config.video_dir),
    }
}
