//! Data carried between discovery, removal and display.

use crate::app_info::AppInfo;
use crate::size;
use serde::Serialize;
use std::path::PathBuf;

/// Location label used for the application bundle itself.
pub const APPLICATIONS_LOCATION: &str = "Applications";

/// A file or directory believed to belong to an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssociatedItem {
    pub path: PathBuf,
    pub name: String,
    /// Label of the search root the item was found under.
    pub location: String,
    pub app_name: String,
    /// `None` until sizes are annotated. Never defaulted to zero.
    pub size_bytes: Option<u64>,
}

impl AssociatedItem {
    /// Synthesize the item that stands for the app bundle itself.
    pub fn for_app(app: &AppInfo, size_bytes: u64) -> Self {
        Self {
            path: app.path.clone(),
            name: app.full_name.clone(),
            location: APPLICATIONS_LOCATION.to_string(),
            app_name: app.short_name.clone(),
            size_bytes: Some(size_bytes),
        }
    }

    pub fn size_human(&self) -> Option<String> {
        self.size_bytes.map(size::format_size)
    }
}

/// Per-invocation removal switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UninstallOptions {
    /// Report what would happen without touching the filesystem.
    pub dry_run: bool,
    /// Skip every prompt and remove everything.
    pub force: bool,
    /// Write a manifest before the batch runs.
    pub create_log: bool,
}

/// What the user chose to do with the discovered items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UninstallAction {
    RemoveAll,
    SelectItems,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one trash-move batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UninstallOutcome {
    /// Names in processing order.
    pub succeeded_names: Vec<String>,
    pub failed_entries: Vec<FailedEntry>,
    /// Sum of sizes of succeeded items only.
    pub total_bytes_removed: u64,
}

impl UninstallOutcome {
    pub fn record_success(&mut self, item: &AssociatedItem) {
        self.succeeded_names.push(item.name.clone());
        self.total_bytes_removed += item.size_bytes.unwrap_or(0);
    }

    pub fn record_failure(&mut self, item: &AssociatedItem, reason: impl Into<String>) {
        self.failed_entries.push(FailedEntry {
            path: item.path.clone(),
            reason: reason.into(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_entries.is_empty()
    }
}

/// Everything the display layer needs after a removal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub action: UninstallAction,
    pub cancelled: bool,
    /// Absent when the session was cancelled before any batch ran.
    pub outcome: Option<UninstallOutcome>,
    pub notices: Vec<String>,
    pub manifest_path: Option<PathBuf>,
}

impl RemovalReport {
    pub(crate) fn cancelled(action: UninstallAction, notices: Vec<String>) -> Self {
        Self {
            action,
            cancelled: true,
            outcome: None,
            notices,
            manifest_path: None,
        }
    }
}
