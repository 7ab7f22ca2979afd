// reelpress-cli/src/main.rs
//
// Entry point of the `reelpress` binary.
//
// Responsibilities:
// - Parsing the command line (`Cli`).
// - Installing the console and run log file logger.
// - Dispatching to the `compress` or `plan` command.
// - Exiting with status 1 when a command fails; per-file failures inside a
//   batch do not count as command failures.

use clap::Parser;
use console::style;
use reelpress_cli::{Cli, CliResult, Commands, logging, run_compress, run_plan};
use std::process;

fn run(cli: Cli) -> CliResult<()> {
    let log_path = logging::init_logging(&cli.log_dir, cli.verbose)?;
    log::debug!("Run started: {}", chrono::Local::now());
    log::debug!("Run log: {}", log_path.display());

    match cli.command {
        Commands::Compress(args) => run_compress(args, &log_path),
        Commands::Plan(args) => run_plan(args),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        let label = style("Error:").red().bold();
        // The logger is not installed when logging setup itself failed.
        if log::max_level() == log::LevelFilter::Off {
            eprintln!("{label} {e}");
        } else {
            log::error!("{label} {e}");
        }
        process::exit(1);
    }
}
