// reelpress-cli/src/lib.rs
//
// Library portion of the reelpress CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, CompressArgs, PlanArgs};
pub use commands::compress::run_compress;
pub use commands::plan::run_plan;
pub use error::{CliErrorContext, CliResult};
