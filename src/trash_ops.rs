//! Move-to-trash capability.
//!
//! The production mover wraps the `trash` crate. Panics raised inside the
//! backend are turned into errors so one bad path cannot take down a batch.

use crate::error::TrashError;
use std::any::Any;
use std::io;
use std::path::Path;

/// Moves a single path to the user's trash.
pub trait TrashMover {
    fn move_to_trash(&self, path: &Path) -> Result<(), TrashError>;
}

/// Trash backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTrash;

impl TrashMover for SystemTrash {
    fn move_to_trash(&self, path: &Path) -> Result<(), TrashError> {
        if let Err(err) = std::fs::symlink_metadata(path) {
            return Err(match err.kind() {
                io::ErrorKind::PermissionDenied => TrashError::PermissionDenied,
                _ => TrashError::Other(format!("{}: {}", path.display(), err)),
            });
        }
        catch_trash_panic(|| Ok(trash::delete(path)?))
    }
}

fn panic_payload_to_string(panic_payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn catch_trash_panic<R>(f: impl FnOnce() -> Result<R, TrashError>) -> Result<R, TrashError> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(r) => r,
        Err(panic_payload) => Err(TrashError::Panicked(panic_payload_to_string(panic_payload))),
    }
}
