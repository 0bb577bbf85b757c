//! Removal orchestration.
//!
//! A removal session walks a small state machine:
//!
//! ```text
//! Start -> AwaitingDecision -> RemovingAll    -> Finished
//!                           -> SelectingItems -> Finished
//!                           -> Cancelled      -> Finished
//! ```
//!
//! Every prompt that can cancel happens before the first trash call, so a
//! cancelled session never mutates anything. Once a batch starts, every item
//! is attempted and each failure is recorded on its own.

use crate::app_info::AppInfo;
use crate::error::InteractionError;
use crate::interaction::InteractionPort;
use crate::manifest::ManifestWriter;
use crate::size::SizeCalculator;
use crate::trash_ops::TrashMover;
use crate::types::{AssociatedItem, RemovalReport, UninstallAction, UninstallOptions, UninstallOutcome};
use std::path::PathBuf;

pub const REMOVE_ALL_OPTION: &str = "Remove all items";
pub const SELECT_ITEMS_OPTION: &str = "Select which items to remove";
pub const CANCEL_OPTION: &str = "Cancel";

pub const FORCE_NOTICE: &str = "Force flag enabled - removing all items without confirmation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalState {
    Start,
    AwaitingDecision,
    RemovingAll,
    SelectingItems,
    Cancelled,
    Finished,
}

struct BatchRun {
    outcome: UninstallOutcome,
    manifest_path: Option<PathBuf>,
}

pub struct RemovalOrchestrator<'a, P: InteractionPort + ?Sized, T: TrashMover + ?Sized> {
    port: &'a P,
    trash: &'a T,
    options: UninstallOptions,
    sizer: SizeCalculator,
    manifest: Option<ManifestWriter>,
    transitions: Vec<RemovalState>,
}

impl<'a, P: InteractionPort + ?Sized, T: TrashMover + ?Sized> RemovalOrchestrator<'a, P, T> {
    pub fn new(port: &'a P, trash: &'a T, options: UninstallOptions) -> Self {
        Self {
            port,
            trash,
            options,
            sizer: SizeCalculator,
            manifest: None,
            transitions: Vec::new(),
        }
    }

    pub fn with_manifest_writer(mut self, writer: ManifestWriter) -> Self {
        self.manifest = Some(writer);
        self
    }

    /// States visited by the last call to [`run`](Self::run), in order.
    pub fn transitions(&self) -> &[RemovalState] {
        &self.transitions
    }

    /// Resolve what to remove and remove it.
    ///
    /// `files` are the discovered items, already sized. The app bundle itself is
    /// always added by the orchestrator and must not be part of `files`.
    pub fn run(&mut self, app: &AppInfo, files: &[AssociatedItem]) -> RemovalReport {
        self.transitions.clear();

        let mut notices = Vec::new();
        let mut action = UninstallAction::Cancel;
        let mut batch: Option<BatchRun> = None;
        let mut state = RemovalState::Start;

        loop {
            self.transitions.push(state);
            state = match state {
                RemovalState::Start => RemovalState::AwaitingDecision,
                RemovalState::AwaitingDecision => {
                    action = self.resolve_decision(files.len(), &mut notices);
                    match action {
                        UninstallAction::RemoveAll => RemovalState::RemovingAll,
                        UninstallAction::SelectItems => RemovalState::SelectingItems,
                        UninstallAction::Cancel => RemovalState::Cancelled,
                    }
                }
                RemovalState::RemovingAll => {
                    batch = self.remove_all(app, files);
                    if batch.is_some() {
                        RemovalState::Finished
                    } else {
                        RemovalState::Cancelled
                    }
                }
                RemovalState::SelectingItems => {
                    batch = self.remove_selected(app, files);
                    if batch.is_some() {
                        RemovalState::Finished
                    } else {
                        RemovalState::Cancelled
                    }
                }
                RemovalState::Cancelled => RemovalState::Finished,
                RemovalState::Finished => break,
            };
        }

        match batch {
            Some(run) => RemovalReport {
                action,
                cancelled: false,
                outcome: Some(run.outcome),
                notices,
                manifest_path: run.manifest_path,
            },
            None => {
                log::info!("uninstall of {} cancelled, nothing was changed", app.short_name);
                RemovalReport::cancelled(action, notices)
            }
        }
    }

    fn resolve_decision(&self, file_count: usize, notices: &mut Vec<String>) -> UninstallAction {
        if self.options.force {
            log::info!("{}", FORCE_NOTICE);
            notices.push(FORCE_NOTICE.to_string());
            return UninstallAction::RemoveAll;
        }

        match file_count {
            0 => yes_no(self.port.confirm(
                "No additional files found. Would you like to uninstall the app?",
            )),
            1 => yes_no(self.port.confirm(
                "Only 1 additional file found. Would you like to include this file as well?",
            )),
            n => {
                let options = [REMOVE_ALL_OPTION, SELECT_ITEMS_OPTION, CANCEL_OPTION]
                    .map(String::from);
                let prompt = format!("{} additional files found. What would you like to do?", n);
                match self.port.choose_one(&prompt, &options) {
                    Ok(choice) => parse_action(&choice),
                    Err(InteractionError::Cancelled) => UninstallAction::Cancel,
                    Err(err) => {
                        log::warn!("could not read uninstall choice: {}", err);
                        UninstallAction::Cancel
                    }
                }
            }
        }
    }

    fn remove_all(&self, app: &AppInfo, files: &[AssociatedItem]) -> Option<BatchRun> {
        if !self.options.force {
            let prompt = format!("Confirmation: Move all {} items to trash?", files.len() + 1);
            if !self.port.confirm(&prompt) {
                return None;
            }
        }
        Some(self.run_with_app(app, files))
    }

    fn remove_selected(&self, app: &AppInfo, files: &[AssociatedItem]) -> Option<BatchRun> {
        let mut selectable = Vec::with_capacity(files.len() + 1);
        selectable.push(self.app_item(app));
        selectable.extend_from_slice(files);

        let selected = self.port.choose_many("Select items to remove:", &selectable);
        if selected.is_empty() {
            return None;
        }

        if !self.options.force {
            let prompt = format!("Confirm: Move {} selected items to trash?", selected.len());
            if !self.port.confirm(&prompt) {
                return None;
            }
        }

        let (app_picked, rest): (Vec<_>, Vec<_>) =
            selected.into_iter().partition(|item| item.path == app.path);

        if app_picked.is_empty() {
            // The app stays installed, so its size never counts toward the total.
            Some(self.execute_batch(app, &rest))
        } else {
            Some(self.run_with_app(app, &rest))
        }
    }

    fn app_item(&self, app: &AppInfo) -> AssociatedItem {
        AssociatedItem::for_app(app, self.sizer.size(&app.path))
    }

    /// Batch over `[app] ++ files`, app first.
    fn run_with_app(&self, app: &AppInfo, files: &[AssociatedItem]) -> BatchRun {
        let mut items = Vec::with_capacity(files.len() + 1);
        items.push(self.app_item(app));
        items.extend_from_slice(files);
        self.execute_batch(app, &items)
    }

    fn execute_batch(&self, app: &AppInfo, items: &[AssociatedItem]) -> BatchRun {
        let dry_run = self.options.dry_run;
        log::debug!(
            "batch start: app={} dry_run={} count={}",
            app.short_name,
            dry_run,
            items.len()
        );

        let manifest_path = if self.options.create_log && !items.is_empty() {
            self.write_manifest(app, items)
        } else {
            None
        };

        let mut outcome = UninstallOutcome::default();
        for item in items {
            if dry_run {
                log::info!("[dry run] would move {} to trash", item.name);
                outcome.record_success(item);
                continue;
            }

            match self.trash.move_to_trash(&item.path) {
                Ok(()) => {
                    log::info!("moved {} to trash", item.name);
                    outcome.record_success(item);
                }
                Err(err) => {
                    log::warn!("failed to remove {}: {}", item.path.display(), err);
                    outcome.record_failure(item, err.to_string());
                }
            }
        }

        log::debug!(
            "batch done: succeeded={} failed={} bytes={}",
            outcome.succeeded_names.len(),
            outcome.failed_entries.len(),
            outcome.total_bytes_removed
        );

        BatchRun {
            outcome,
            manifest_path,
        }
    }

    fn write_manifest(&self, app: &AppInfo, items: &[AssociatedItem]) -> Option<PathBuf> {
        let writer = match &self.manifest {
            Some(writer) => writer,
            None => {
                log::warn!("uninstall log requested but no log directory is configured");
                return None;
            }
        };

        match writer.write(app, items, self.options.dry_run) {
            Ok(path) => {
                log::info!("uninstall log written to {}", path.display());
                Some(path)
            }
            Err(err) => {
                log::warn!("could not write uninstall log: {:#}", err);
                None
            }
        }
    }
}

fn yes_no(answer: bool) -> UninstallAction {
    if answer {
        UninstallAction::RemoveAll
    } else {
        UninstallAction::Cancel
    }
}

/// Map a menu answer to an action. Anything unrecognized cancels.
fn parse_action(choice: &str) -> UninstallAction {
    match choice {
        REMOVE_ALL_OPTION => UninstallAction::RemoveAll,
        SELECT_ITEMS_OPTION => UninstallAction::SelectItems,
        _ => UninstallAction::Cancel,
    }
}
