// ============================================================================
// reelpress-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the reelpress Core Library
//
// This module defines the error type shared by every part of the library,
// together with helper constructors for failures of external commands.
//
// KEY COMPONENTS:
// - CoreError: All failure modes of planning, probing, encoding and setup
// - CoreResult: Result alias used throughout the crate
// - command_*_error: Constructors for command start/wait/exit failures
//
// Errors fall into two groups. Setup errors (see `CoreError::is_fatal`) stop
// the whole run. Everything else is a per-file error that the batch driver
// reports before moving on to the next file.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the reelpress core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Required dependency '{0}' not found. Install it or pass an explicit path.")]
    DependencyNotFound(String),

    #[error("Encoder provisioning failed: {0}")]
    ToolProvisioning(String),

    #[error("Video directory not found: {0}")]
    InputDirNotFound(String),

    #[error("No video files found to process")]
    NoFilesFound,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for command '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("Command '{command}' failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Failed to parse ffprobe output: {0}")]
    FfprobeParse(String),

    #[error("Could not read video information: {0}")]
    VideoInfo(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("{0}")]
    OperationFailed(String),
}

impl CoreError {
    /// Returns true for setup errors that must abort the whole run.
    ///
    /// Per-file errors (encoder failures, probe failures, invalid media) return
    /// false; the batch driver logs them and continues with the next file.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DependencyNotFound(_)
                | Self::ToolProvisioning(_)
                | Self::InputDirNotFound(_)
                | Self::NoFilesFound
                | Self::Config(_)
        )
    }
}

/// Result type for reelpress core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds the error for a command that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: io::Error) -> CoreError {
    let command = command.into();
    if err.kind() == io::ErrorKind::NotFound {
        return CoreError::DependencyNotFound(command);
    }
    CoreError::CommandStart(command, err)
}

/// Builds the error for a command whose exit status could not be collected.
pub fn command_wait_error(command: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), err)
}

/// Builds the error for a command that ran but reported failure.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into(),
    }
}
