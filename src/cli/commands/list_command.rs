//! List command feature.
//!
//! This module owns and handles the "appsweep list" command behavior.

use crate::app_lister::{AppLister, CodesignCheck};
use crate::config::Config;
use crate::fs_provider::LocalFileSystem;
use crate::output::{self, OutputMode};
use crate::progress;

pub(crate) fn handle_list(config: &Config, output_mode: OutputMode) -> anyhow::Result<()> {
    let spinner = progress::spinner_for(output_mode, "Checking application signatures...");
    let lister = AppLister::new(&LocalFileSystem, &CodesignCheck, config.applications_dir());
    let apps = lister.list_third_party_apps();
    if let Some(sp) = &spinner {
        progress::finish_and_clear(sp);
    }

    let apps = apps?;
    if apps.is_empty() && output_mode != OutputMode::Quiet {
        println!(
            "No third-party applications found in {}.",
            config.applications_dir().display()
        );
        return Ok(());
    }

    output::print_app_list(&apps, output_mode);
    Ok(())
}
