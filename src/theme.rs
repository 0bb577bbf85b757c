//! Terminal styling helpers.
//!
//! Colors follow `colored`'s global switches, so `NO_COLOR` and
//! `CLICOLOR_FORCE` behave as usual.

use colored::Colorize;

pub struct Theme;

impl Theme {
    pub fn header(text: &str) -> String {
        text.bold().to_string()
    }

    pub fn success(text: &str) -> String {
        text.green().to_string()
    }

    pub fn warning(text: &str) -> String {
        text.yellow().to_string()
    }

    pub fn error(text: &str) -> String {
        text.red().bold().to_string()
    }

    pub fn muted(text: &str) -> String {
        text.dimmed().to_string()
    }

    pub fn category(text: &str) -> String {
        text.blue().bold().to_string()
    }

    pub fn size(text: &str) -> String {
        text.cyan().to_string()
    }

    pub fn command(text: &str) -> String {
        text.cyan().bold().to_string()
    }

    /// Plain divider line
    pub fn divider(width: usize) -> String {
        "-".repeat(width)
    }

    pub fn divider_bold(width: usize) -> String {
        "=".repeat(width)
    }
}
