//! Terminal output functions for reelpress-core.
//!
//! Progress and status lines are emitted through the `log` facade so that the
//! CLI's logger decides where they end up (console, run log file). Styling uses
//! `console` and is disabled when `NO_COLOR` is set. The encode progress bar is
//! drawn with `indicatif` on stderr, only when stderr is a terminal.

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{error, info, warn};
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;

struct ProgressState {
    progress_bar: Option<ProgressBar>,
}

impl ProgressState {
    const fn new() -> Self {
        Self { progress_bar: None }
    }
}

static PROGRESS_STATE: Mutex<ProgressState> = Mutex::new(ProgressState::new());

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a section header (Level 1 - cyan banner)
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", style(title.to_uppercase()).cyan().bold());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print a processing step (Level 2 - bold with a chevron)
pub fn print_processing(message: &str) {
    info!("");
    if should_use_color() {
        info!("  » {}", style(message).bold());
    } else {
        info!("  » {}", message);
    }
}

/// Print a status line (Level 3 - aligned `label: value`)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let padding = status_padding(label);

    if should_use_color() && highlight {
        info!("    {}:{}{}", label, " ".repeat(padding), style(value).bold());
    } else {
        info!("    {}:{}{}", label, " ".repeat(padding), value);
    }
}

/// Spaces after `label:` so values line up; at least one.
fn status_padding(label: &str) -> usize {
    let label_width: usize = 17;
    label_width.saturating_sub(label.len()).max(1)
}

/// Print a sub-item (Level 3 - plain indented text)
pub fn print_sub_item(message: &str) {
    info!("    {}", message);
}

/// Print a success message
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("    {} {}", style("✓").green().bold(), style(message).green());
    } else {
        info!("    ✓ {}", message);
    }
}

/// Print a per-file warning, such as a skipped file
pub fn print_warning(message: &str) {
    if should_use_color() {
        warn!("    {} {}", style("!").yellow().bold(), style(message).yellow());
    } else {
        warn!("    ! {}", message);
    }
}

/// Print a per-file failure
pub fn print_error(message: &str) {
    if should_use_color() {
        error!("    {} {}", style("✗").red().bold(), style(message).red());
    } else {
        error!("    ✗ {}", message);
    }
}

fn init_progress_bar(total_secs: f64) -> ProgressBar {
    let pb = ProgressBar::new((total_secs * 1000.0) as u64);

    if let Ok(bar_style) = ProgressStyle::default_bar()
        .template("    Compressing: {percent:>3}% [{bar:30}] ({elapsed_precise} / {eta_precise}) {msg}")
    {
        pb.set_style(bar_style.progress_chars("##."));
    }

    if !std::io::stderr().is_terminal() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }

    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Advance the encode progress bar to `elapsed_secs` of `total_secs`.
pub fn print_progress_bar(elapsed_secs: f64, total_secs: f64, speed: Option<f32>) {
    if !std::io::stderr().is_terminal() || total_secs <= 0.0 {
        return;
    }

    let Ok(mut state) = PROGRESS_STATE.lock() else {
        return;
    };

    let pb = state
        .progress_bar
        .get_or_insert_with(|| init_progress_bar(total_secs));
    pb.set_position((elapsed_secs.clamp(0.0, total_secs) * 1000.0) as u64);
    if let Some(speed) = speed {
        pb.set_message(format!("{speed:.2}x"));
    }
}

/// Clear the encode progress bar
pub fn clear_progress_bar() {
    if let Ok(mut state) = PROGRESS_STATE.lock() {
        if let Some(pb) = state.progress_bar.take() {
            pb.finish_and_clear();
        }
    }
}
