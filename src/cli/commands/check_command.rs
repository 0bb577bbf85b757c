//! Check command feature.
//!
//! This module owns and handles the "appsweep check" command behavior.

use super::{home_dir, resolve_app};
use crate::config::Config;
use crate::finder::{annotate_sizes, AssociatedFileFinder};
use crate::fs_provider::LocalFileSystem;
use crate::interaction::TerminalPrompt;
use crate::output::{self, OutputMode};
use crate::progress;
use crate::size::SizeCalculator;
use std::path::PathBuf;

pub(crate) fn handle_check(
    config: &Config,
    app: Option<PathBuf>,
    json: bool,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let prompt = TerminalPrompt::stdio();
    let app = match resolve_app(
        app,
        config,
        &prompt,
        "Select an application to check for associated files:",
        output_mode,
    )? {
        Some(app) => app,
        None => return Ok(()),
    };

    let home = home_dir()?;
    let finder = AssociatedFileFinder::new(&LocalFileSystem, config.search_locations(&home));

    // JSON output stays clean: no spinner.
    let spinner = if json {
        None
    } else {
        progress::spinner_for(
            output_mode,
            &format!("Searching for files associated with {}...", app.short_name),
        )
    };
    let mut files = finder.find(&app);
    annotate_sizes(&mut files, &SizeCalculator);
    if let Some(sp) = &spinner {
        progress::finish_and_clear(sp);
    }

    if json {
        println!("{}", output::check_results_json(&app, &files)?);
    } else {
        output::print_check_results(&app, &files, output_mode);
    }
    Ok(())
}
