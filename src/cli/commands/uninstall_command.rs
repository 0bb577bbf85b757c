//! Uninstall command feature.
//!
//! This module owns and handles the "appsweep uninstall" command behavior.
//! Every collaborator is built here, once per invocation.

use super::{home_dir, resolve_app};
use crate::config::Config;
use crate::finder::{annotate_sizes, AssociatedFileFinder};
use crate::fs_provider::LocalFileSystem;
use crate::interaction::TerminalPrompt;
use crate::manifest::ManifestWriter;
use crate::orchestrator::RemovalOrchestrator;
use crate::output::{self, OutputMode};
use crate::progress;
use crate::size::SizeCalculator;
use crate::trash_ops::SystemTrash;
use crate::types::UninstallOptions;
use std::path::PathBuf;

pub(crate) fn handle_uninstall(
    config: &Config,
    app: Option<PathBuf>,
    options: UninstallOptions,
    output_mode: OutputMode,
) -> anyhow::Result<()> {
    let prompt = TerminalPrompt::stdio();
    let app = match resolve_app(
        app,
        config,
        &prompt,
        "Select an application to uninstall:",
        output_mode,
    )? {
        Some(app) => app,
        None => return Ok(()),
    };

    let home = home_dir()?;
    let sizer = SizeCalculator;
    let finder = AssociatedFileFinder::new(&LocalFileSystem, config.search_locations(&home));

    let spinner = progress::spinner_for(
        output_mode,
        &format!("Searching for files associated with {}...", app.short_name),
    );
    let mut files = finder.find(&app);
    annotate_sizes(&mut files, &sizer);
    let app_size = sizer.size(&app.path);
    if let Some(sp) = &spinner {
        progress::finish_and_clear(sp);
    }

    output::print_found_items(&app, app_size, &files, output_mode);

    if options.dry_run && output_mode != OutputMode::Quiet {
        println!();
        println!("[DRY RUN] Nothing will be moved to the Trash.");
    }

    let trash = SystemTrash;
    let mut orchestrator = RemovalOrchestrator::new(&prompt, &trash, options)
        .with_manifest_writer(ManifestWriter::new(config.log_root(&home)));
    let report = orchestrator.run(&app, &files);

    output::print_removal_report(&report, options.dry_run, output_mode);
    Ok(())
}
