//! Config command feature.
//!
//! This module owns and handles the "appsweep config" command behavior.

use crate::config::Config;
use crate::theme::Theme;

pub(crate) fn handle_config(show: bool, reset: bool) -> anyhow::Result<()> {
    if reset {
        Config::default().save()?;
        println!("{} Configuration reset to defaults", Theme::success("OK"));
        if let Ok(path) = Config::config_path() {
            println!("  {}", path.display());
        }
        return Ok(());
    }

    let config = Config::load();
    let path = Config::config_path()?;

    if !show {
        println!("Config file: {}", path.display());
        println!("Use --show to print the current configuration or --reset to restore defaults.");
        return Ok(());
    }

    println!("{}", Theme::header("Current Configuration"));
    println!("{}", Theme::divider_bold(60));
    println!();
    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("  {}", Theme::muted("(not created yet - using defaults)"));
    }
    println!();
    println!("Search roots:");
    if config.search.roots.is_empty() {
        println!("  (none)");
    } else {
        for root in &config.search.roots {
            println!("  {:<22} {}", root.label, Theme::muted(&root.path));
        }
    }
    println!();
    println!("Paths:");
    println!("  Applications: {}", config.paths.applications_dir);
    match &config.paths.log_dir {
        Some(dir) => println!("  Uninstall logs: {}", dir),
        None => println!("  Uninstall logs: ~/Library/Logs/appsweep (default)"),
    }
    println!();
    println!("{}", Theme::divider(60));
    Ok(())
}
