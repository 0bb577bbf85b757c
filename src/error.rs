//! Error types shared by the library.
//!
//! Discovery and manifest failures never reach these types: they are
//! downgraded where they happen. What remains is what a caller can act on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the command layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not read applications directory {}: {source}", path.display())]
    ApplicationsUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no home directory could be determined for the current user")]
    HomeDirUnavailable,

    #[error("application not found: {}", .0.display())]
    AppNotFound(PathBuf),

    #[error(transparent)]
    Interaction(#[from] InteractionError),
}

/// Errors raised by an interaction port.
#[derive(Debug, Error)]
pub enum InteractionError {
    /// The user backed out of a selection prompt.
    #[error("selection cancelled")]
    Cancelled,

    #[error("failed to read user input: {0}")]
    Io(#[from] io::Error),
}

/// Failure to move one path to the trash.
#[derive(Debug, Error)]
pub enum TrashError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("trash operation failed: {0}")]
    Os(#[from] trash::Error),

    /// The trash backend panicked; the message is the panic payload.
    #[error("trash operation panicked (dependency bug): {0}")]
    Panicked(String),

    #[error("{0}")]
    Other(String),
}
