//! Directory listing capability.

use std::fs;
use std::io;
use std::path::Path;

/// Lists the entry names of a directory.
///
/// Implementations report `NotFound` or `PermissionDenied` as plain
/// `io::Error`s; callers decide whether a failure matters.
pub trait FileSystemProvider {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Lists entries from the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystemProvider for LocalFileSystem {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}
