//! In-memory capability implementations.
//!
//! Each capability the core consumes has a fake here, so removal sessions
//! can be driven end to end without a terminal, a trash can, or `codesign`.

use crate::app_lister::VendorCheck;
use crate::error::{InteractionError, TrashError};
use crate::fs_provider::FileSystemProvider;
use crate::interaction::InteractionPort;
use crate::trash_ops::TrashMover;
use crate::types::AssociatedItem;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};

/// Directory listings held in memory. Unknown paths are `NotFound`.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    dirs: HashMap<PathBuf, Vec<String>>,
    errors: HashMap<PathBuf, io::ErrorKind>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>, entries: &[&str]) -> Self {
        self.dirs
            .insert(path.into(), entries.iter().map(|e| e.to_string()).collect());
        self
    }

    pub fn with_error(mut self, path: impl Into<PathBuf>, kind: io::ErrorKind) -> Self {
        self.errors.insert(path.into(), kind);
        self
    }
}

impl FileSystemProvider for MemoryFileSystem {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<String>> {
        if let Some(kind) = self.errors.get(path) {
            return Err(io::Error::from(*kind));
        }
        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

/// A prompt the scripted port was asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCall {
    Confirm(String),
    ChooseOne(String),
    /// Prompt and the number of items offered.
    ChooseMany(String, usize),
}

/// Replays scripted answers and records every prompt.
///
/// Once a queue runs dry: `confirm` answers no, `choose_one` reports
/// `Cancelled`, and `choose_many` selects nothing.
#[derive(Debug, Default)]
pub struct ScriptedInteraction {
    confirms: RefCell<VecDeque<bool>>,
    choices: RefCell<VecDeque<String>>,
    selections: RefCell<VecDeque<Vec<String>>>,
    calls: RefCell<Vec<PromptCall>>,
}

impl ScriptedInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_with(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }

    pub fn choose(self, answer: &str) -> Self {
        self.choices.borrow_mut().push_back(answer.to_string());
        self
    }

    /// Queue a multi-selection, by item name.
    pub fn select(self, names: &[&str]) -> Self {
        self.selections
            .borrow_mut()
            .push_back(names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn calls(&self) -> Vec<PromptCall> {
        self.calls.borrow().clone()
    }
}

impl InteractionPort for ScriptedInteraction {
    fn confirm(&self, prompt: &str) -> bool {
        self.calls
            .borrow_mut()
            .push(PromptCall::Confirm(prompt.to_string()));
        self.confirms.borrow_mut().pop_front().unwrap_or(false)
    }

    fn choose_one(&self, prompt: &str, _options: &[String]) -> Result<String, InteractionError> {
        self.calls
            .borrow_mut()
            .push(PromptCall::ChooseOne(prompt.to_string()));
        self.choices
            .borrow_mut()
            .pop_front()
            .ok_or(InteractionError::Cancelled)
    }

    fn choose_many(&self, prompt: &str, items: &[AssociatedItem]) -> Vec<AssociatedItem> {
        self.calls
            .borrow_mut()
            .push(PromptCall::ChooseMany(prompt.to_string(), items.len()));
        let wanted = self.selections.borrow_mut().pop_front().unwrap_or_default();
        items
            .iter()
            .filter(|item| wanted.contains(&item.name))
            .cloned()
            .collect()
    }
}

/// Records trash calls instead of touching the disk.
#[derive(Debug, Default)]
pub struct RecordingTrash {
    failing: HashSet<PathBuf>,
    attempted: RefCell<Vec<PathBuf>>,
    moved: RefCell<Vec<PathBuf>>,
}

impl RecordingTrash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make moves of `path` fail with a permission error.
    pub fn fail_on(mut self, path: impl AsRef<Path>) -> Self {
        self.failing.insert(path.as_ref().to_path_buf());
        self
    }

    pub fn attempted(&self) -> Vec<PathBuf> {
        self.attempted.borrow().clone()
    }

    pub fn moved(&self) -> Vec<PathBuf> {
        self.moved.borrow().clone()
    }
}

impl TrashMover for RecordingTrash {
    fn move_to_trash(&self, path: &Path) -> Result<(), TrashError> {
        self.attempted.borrow_mut().push(path.to_path_buf());
        if self.failing.contains(path) {
            return Err(TrashError::PermissionDenied);
        }
        self.moved.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Treats a fixed set of bundle names as vendor apps.
#[derive(Debug, Default)]
pub struct FixedVendorCheck {
    vendor_apps: HashSet<String>,
}

impl FixedVendorCheck {
    pub fn new(vendor_apps: &[&str]) -> Self {
        Self {
            vendor_apps: vendor_apps.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl VendorCheck for FixedVendorCheck {
    fn is_vendor_app(&self, app_path: &Path) -> bool {
        app_path
            .file_name()
            .map(|name| self.vendor_apps.contains(&*name.to_string_lossy()))
            .unwrap_or(false)
    }
}
