//! Uninstall manifest.
//!
//! A plain-text record of what a removal batch is about to touch, written
//! before the first item is moved. Writing it is best-effort.

use crate::app_info::AppInfo;
use crate::types::AssociatedItem;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

#[derive(Debug, Clone)]
pub struct ManifestWriter {
    log_root: PathBuf,
}

impl ManifestWriter {
    pub fn new(log_root: impl Into<PathBuf>) -> Self {
        Self {
            log_root: log_root.into(),
        }
    }

    pub fn log_root(&self) -> &Path {
        &self.log_root
    }

    /// Path the manifest for `app` would be written to at `now`.
    pub fn manifest_path(&self, app: &AppInfo, now: DateTime<Local>) -> PathBuf {
        self.log_root.join(format!(
            "{}-{}-uninstall.log",
            now.format(TIMESTAMP_FORMAT),
            app.short_name
        ))
    }

    /// Write the manifest, returning where it landed.
    pub fn write(
        &self,
        app: &AppInfo,
        items: &[AssociatedItem],
        dry_run: bool,
    ) -> Result<PathBuf> {
        let now = Local::now();
        let path = self.manifest_path(app, now);

        fs::create_dir_all(&self.log_root).with_context(|| {
            format!("Failed to create log directory: {}", self.log_root.display())
        })?;
        fs::write(&path, render(app, items, dry_run, now))
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;

        Ok(path)
    }
}

/// Manifest body: header, date, dry-run flag, blank line, then one entry per item.
pub fn render(
    app: &AppInfo,
    items: &[AssociatedItem],
    dry_run: bool,
    now: DateTime<Local>,
) -> String {
    let mut content = String::new();
    let _ = writeln!(content, "Uninstall Log for {}", app.full_name);
    let _ = writeln!(content, "Date: {}", now.to_rfc3339());
    let _ = writeln!(content, "Dry Run: {}", dry_run);
    content.push('\n');

    for item in items {
        match item.size_human() {
            Some(size) => {
                let _ = writeln!(content, "- {} ({})", item.name, size);
            }
            None => {
                let _ = writeln!(content, "- {}", item.name);
            }
        }
        let _ = writeln!(content, "  Path: {}", item.path.display());
    }

    content
}
