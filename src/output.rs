use crate::app_info::AppInfo;
use crate::size::format_size;
use crate::theme::Theme;
use crate::types::{AssociatedItem, RemovalReport};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Output verbosity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Quiet,       // Only errors
    Normal,      // Standard output
    Verbose,     // More details
    VeryVerbose, // All details including file paths
}

impl OutputMode {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            OutputMode::Quiet
        } else if verbose >= 2 {
            OutputMode::VeryVerbose
        } else if verbose == 1 {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }
}

/// Group items by location label, both levels sorted for display.
pub fn group_by_location(items: &[AssociatedItem]) -> BTreeMap<&str, Vec<&AssociatedItem>> {
    let mut groups: BTreeMap<&str, Vec<&AssociatedItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.location.as_str()).or_default().push(item);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.name.cmp(&b.name));
    }
    groups
}

pub fn sized_total(items: &[AssociatedItem]) -> u64 {
    items.iter().map(|i| i.size_bytes.unwrap_or(0)).sum()
}

fn print_item(item: &AssociatedItem) {
    let size = item
        .size_human()
        .map(|s| format!(" ({})", Theme::size(&s)))
        .unwrap_or_default();
    println!("  • {}{}", item.name, size);
    println!("    {}", Theme::muted(&item.path.display().to_string()));
}

fn print_groups(items: &[AssociatedItem]) {
    for (location, group) in group_by_location(items) {
        println!();
        println!("{}", Theme::category(&format!("{}:", location)));
        for item in group {
            print_item(item);
        }
    }
}

/// Print the app and everything found for it before asking what to remove.
pub fn print_found_items(app: &AppInfo, app_size: u64, files: &[AssociatedItem], mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }

    let total = app_size + sized_total(files);
    if !files.is_empty() {
        println!();
        println!(
            "{}",
            Theme::header(&format!(
                "Found {} items associated with {}:",
                files.len() + 1,
                app.short_name
            ))
        );
    }

    println!();
    println!("{}", Theme::category("Application:"));
    println!("  • {} ({})", app.full_name, Theme::size(&format_size(app_size)));
    println!("    {}", Theme::muted(&app.path.display().to_string()));

    if files.is_empty() {
        println!();
        println!("No additional files found.");
        println!();
        println!("Total size: {}", Theme::size(&format_size(total)));
    } else {
        print_groups(files);
        println!();
        println!("Total size: ~{}", Theme::size(&format_size(total)));
    }
}

/// Print discovery results for the `check` command.
pub fn print_check_results(app: &AppInfo, files: &[AssociatedItem], mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }
    if files.is_empty() {
        println!("No associated files found for {}.", app.short_name);
        return;
    }

    println!();
    println!(
        "Found {} associated file(s)/folder(s), {} total:",
        files.len(),
        Theme::size(&format_size(sized_total(files)))
    );
    print_groups(files);
}

#[derive(Serialize)]
struct JsonCheckResults<'a> {
    version: &'static str,
    timestamp: String,
    app: &'a AppInfo,
    items: &'a [AssociatedItem],
    total_bytes: u64,
    total_human: String,
}

pub fn check_results_json(app: &AppInfo, files: &[AssociatedItem]) -> Result<String> {
    let total = sized_total(files);
    let results = JsonCheckResults {
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Local::now().to_rfc3339(),
        app,
        items: files,
        total_bytes: total,
        total_human: format_size(total),
    };
    serde_json::to_string_pretty(&results).context("Failed to serialize results")
}

pub fn print_app_list(apps: &[AppInfo], mode: OutputMode) {
    for app in apps {
        match mode {
            OutputMode::Quiet | OutputMode::Normal => println!("{}", app.full_name),
            OutputMode::Verbose | OutputMode::VeryVerbose => {
                println!("{}  {}", app.full_name, Theme::muted(&app.path.display().to_string()))
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Print the end-of-session summary: failures first, then successes.
pub fn print_removal_report(report: &RemovalReport, dry_run: bool, mode: OutputMode) {
    if mode == OutputMode::Quiet {
        return;
    }

    for notice in &report.notices {
        println!();
        println!("{}", Theme::warning(notice));
    }

    let outcome = match (&report.outcome, report.cancelled) {
        (Some(outcome), false) => outcome,
        _ => {
            println!();
            println!("Uninstall cancelled. No changes were made.");
            return;
        }
    };

    if let Some(path) = &report.manifest_path {
        println!();
        println!("Log created at: {}", path.display());
    }

    if outcome.has_failures() {
        println!();
        println!(
            "{}",
            Theme::warning(&format!(
                "Could not remove {} item(s):",
                outcome.failed_entries.len()
            ))
        );
        for failed in &outcome.failed_entries {
            println!("  • {}", display_name(&failed.path));
            if mode != OutputMode::Normal {
                println!("    {}", Theme::muted(&failed.reason));
            }
        }
        println!();
        println!("You may need to quit the app or restart your Mac to remove these items.");
    }

    if !outcome.succeeded_names.is_empty() {
        let action = if dry_run {
            "Would have removed"
        } else {
            "Successfully removed"
        };
        println!();
        println!(
            "{} {} item(s) (~{})",
            Theme::success(action),
            outcome.succeeded_names.len(),
            Theme::size(&format_size(outcome.total_bytes_removed))
        );
        if mode == OutputMode::VeryVerbose {
            for name in &outcome.succeeded_names {
                println!("  • {}", name);
            }
        }
        if !dry_run {
            println!();
            println!("Items have been moved to trash and can be restored from there if needed.");
        }
    }
}
