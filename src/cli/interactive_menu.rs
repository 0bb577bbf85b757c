//! Interactive menu feature.
//!
//! This module owns the command overview shown when no command is given.

use super::Cli;
use crate::theme::Theme;

impl Cli {
    /// Show the command overview when no command is provided
    pub fn show_interactive_menu() {
        println!();
        println!("{}", Theme::header("appsweep - Uninstall apps and their leftovers"));
        println!("{}", Theme::divider_bold(60));
        println!();
        println!("Available Commands:");
        println!();
        for (command, alias, about) in [
            ("list", "ls", "List third-party applications"),
            ("check", "c", "Show files an application left behind"),
            ("uninstall", "u", "Move an application and its files to the Trash"),
            ("config", "", "View or reset configuration"),
        ] {
            if alias.is_empty() {
                println!("  {}", Theme::command(command));
            } else {
                println!(
                    "  {}  {}  {}",
                    Theme::command(command),
                    Theme::muted("or"),
                    Theme::command(alias)
                );
            }
            println!("     {} {}", Theme::muted("→"), about);
            println!();
        }
        println!("Run {} for all options.", Theme::command("appsweep <command> --help"));
    }
}
