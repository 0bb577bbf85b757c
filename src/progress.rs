use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output::OutputMode;

/// Braille spinner frames, same as indicatif's default dots.
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner for indeterminate progress
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars(SPINNER_CHARS)
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Spinner unless output is quiet
pub fn spinner_for(mode: OutputMode, msg: &str) -> Option<ProgressBar> {
    if mode == OutputMode::Quiet {
        None
    } else {
        Some(create_spinner(msg))
    }
}

pub fn finish_and_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}
