use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::logging;
use crate::output::OutputMode;

pub mod commands;
mod interactive_menu;

use commands::{check_command, config_command, list_command, uninstall_command};

#[derive(Parser)]
#[command(name = "appsweep")]
#[command(version)]
#[command(about = "Uninstall macOS apps together with the files they leave behind")]
#[command(
    long_about = "appsweep finds the caches, preferences, logs and support files an \
    application leaves in your Library folder and moves them to the Trash together \
    with the app.\n\n\
    Examples:\n  \
    appsweep list                          # List third-party apps\n  \
    appsweep check --app /Applications/Zoom.app\n  \
    appsweep uninstall --dry-run           # Show what would be removed\n  \
    appsweep uninstall --log               # Keep a manifest of what was removed"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v, -vv for more)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Applications directory to list apps from [default: /Applications]
    #[arg(long, value_name = "PATH", global = true)]
    pub applications_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List third-party applications
    #[command(visible_alias = "ls")]
    List,

    /// Show the files associated with an application
    #[command(visible_alias = "c")]
    Check {
        /// Application bundle to check (prompts when omitted)
        #[arg(long, value_name = "PATH")]
        app: Option<PathBuf>,

        /// Output results as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Uninstall an application and move its associated files to the Trash
    #[command(visible_alias = "u")]
    Uninstall {
        /// Application bundle to uninstall (prompts when omitted)
        #[arg(long, value_name = "PATH")]
        app: Option<PathBuf>,

        /// Show what would be removed without removing anything
        #[arg(short = 'd', long)]
        dry_run: bool,

        /// Skip confirmation prompts (dangerous!)
        #[arg(long)]
        force: bool,

        /// Write a log of the items being removed
        #[arg(long)]
        log: bool,
    },

    /// View or reset configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let output_mode = OutputMode::from_flags(self.quiet, self.verbose);
        logging::init(output_mode);

        let mut config = Config::load();
        config.apply_cli_overrides(self.applications_dir);

        match self.command {
            None => {
                Self::show_interactive_menu();
                Ok(())
            }
            Some(Commands::List) => list_command::handle_list(&config, output_mode),
            Some(Commands::Check { app, json }) => {
                check_command::handle_check(&config, app, json, output_mode)
            }
            Some(Commands::Uninstall {
                app,
                dry_run,
                force,
                log,
            }) => uninstall_command::handle_uninstall(
                &config,
                app,
                crate::types::UninstallOptions {
                    dry_run,
                    force,
                    create_log: log,
                },
                output_mode,
            ),
            Some(Commands::Config { show, reset }) => config_command::handle_config(show, reset),
        }
    }
}
