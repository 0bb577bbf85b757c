//! Command feature handlers.
//!
//! Each module owns one command feature. Shared app resolution lives here.

pub mod check_command;
pub mod config_command;
pub mod list_command;
pub mod uninstall_command;

use crate::app_info::AppInfo;
use crate::app_lister::{AppLister, CodesignCheck};
use crate::config::Config;
use crate::error::{AppError, InteractionError};
use crate::fs_provider::LocalFileSystem;
use crate::interaction::InteractionPort;
use crate::output::OutputMode;
use crate::progress;
use anyhow::Context;
use directories::BaseDirs;
use std::path::PathBuf;

pub(crate) fn home_dir() -> Result<PathBuf, AppError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(AppError::HomeDirUnavailable)
}

/// Use `app` if given, otherwise let the user pick from the installed apps.
///
/// `Ok(None)` means there was nothing to pick or the user backed out.
pub(crate) fn resolve_app<P: InteractionPort + ?Sized>(
    app: Option<PathBuf>,
    config: &Config,
    port: &P,
    prompt: &str,
    output_mode: OutputMode,
) -> anyhow::Result<Option<AppInfo>> {
    if let Some(path) = app {
        if !path.exists() {
            return Err(AppError::AppNotFound(path).into());
        }
        return Ok(Some(AppInfo::new(path)));
    }

    let spinner = progress::spinner_for(output_mode, "Looking for installed applications...");
    let lister = AppLister::new(&LocalFileSystem, &CodesignCheck, config.applications_dir());
    let apps = lister.list_third_party_apps();
    if let Some(sp) = &spinner {
        progress::finish_and_clear(sp);
    }
    let apps = apps.context("Failed to list applications")?;

    if apps.is_empty() {
        println!("No third-party applications found in {}.", config.applications_dir().display());
        return Ok(None);
    }

    let names: Vec<String> = apps.iter().map(|a| a.full_name.clone()).collect();
    let choice = match port.choose_one(prompt, &names) {
        Ok(choice) => choice,
        Err(InteractionError::Cancelled) => return Ok(None),
        Err(err) => return Err(AppError::from(err).into()),
    };

    match apps.into_iter().find(|a| a.full_name == choice) {
        Some(app) => Ok(Some(app)),
        None => anyhow::bail!("No application named '{}'", choice),
    }
}
