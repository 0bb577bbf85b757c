use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Directory extensions treated as opaque packages when found below the
/// directory being sized.
const PACKAGE_EXTENSIONS: &[&str] = &[
    "app",
    "appex",
    "bundle",
    "framework",
    "kext",
    "mpkg",
    "pkg",
    "plugin",
    "rtfd",
    "xpc",
];

/// Display string for a zero byte count.
pub const ZERO_SIZE: &str = "Zero bytes";

/// Computes on-disk sizes. Reads only; never mutates.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeCalculator;

impl SizeCalculator {
    /// Size of a file, or the recursive size of a directory. Missing paths are 0.
    ///
    /// Directory sizes sum regular files only. Hidden entries are skipped, nested
    /// packages are not descended into, symlinks below the root are not
    /// followed, and anything unreadable is left out of the total.
    pub fn size(&self, path: &Path) -> u64 {
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(_) => return 0,
        };

        if meta.is_dir() {
            directory_size(path)
        } else if meta.is_file() {
            meta.len()
        } else {
            0
        }
    }

    pub fn format(&self, bytes: u64) -> String {
        format_size(bytes)
    }
}

/// Human-readable size using binary units, e.g. `1.5 MiB`
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return ZERO_SIZE.to_string();
    }
    bytesize::to_string(bytes, true)
}

fn directory_size(root: &Path) -> u64 {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || (!is_hidden(entry) && !is_package(entry)))
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.metadata().map(|m| m.len()).unwrap_or(0))
        .sum()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_package(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .path()
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            PACKAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    fn write_bytes(path: &Path, len: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![b'x'; len]).unwrap();
    }

    #[test]
    fn test_missing_path_is_zero() {
        let temp_dir = create_test_dir();
        assert_eq!(SizeCalculator.size(&temp_dir.path().join("nope")), 0);
    }

    #[test]
    fn test_empty_directory_is_zero() {
        let temp_dir = create_test_dir();
        assert_eq!(SizeCalculator.size(temp_dir.path()), 0);
    }

    #[test]
    fn test_file_size() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("data.bin");
        write_bytes(&file, 1234);
        assert_eq!(SizeCalculator.size(&file), 1234);
    }

    #[test]
    fn test_directory_sums_nested_files() {
        let temp_dir = create_test_dir();
        write_bytes(&temp_dir.path().join("a.txt"), 100);
        write_bytes(&temp_dir.path().join("sub/b.txt"), 200);
        write_bytes(&temp_dir.path().join("sub/deeper/c.txt"), 300);

        assert_eq!(SizeCalculator.size(temp_dir.path()), 600);
    }

    #[test]
    fn test_hidden_entries_are_skipped() {
        let temp_dir = create_test_dir();
        write_bytes(&temp_dir.path().join("visible.txt"), 10);
        write_bytes(&temp_dir.path().join(".DS_Store"), 1000);
        write_bytes(&temp_dir.path().join(".git/objects/pack"), 5000);

        assert_eq!(SizeCalculator.size(temp_dir.path()), 10);
    }

    #[test]
    fn test_nested_packages_are_not_descended() {
        let temp_dir = create_test_dir();
        let root = temp_dir.path().join("Helper.app");
        write_bytes(&root.join("Contents/Info.plist"), 50);
        write_bytes(
            &root.join("Contents/Frameworks/Electron.framework/Electron"),
            4096,
        );
        write_bytes(&root.join("Contents/PlugIns/Share.appex/Share"), 2048);

        // The root bundle itself is walked, nested ones are not.
        assert_eq!(SizeCalculator.size(&root), 50);
    }

    #[test]
    fn test_format_zero_is_stable() {
        assert_eq!(format_size(0), ZERO_SIZE);
        assert_eq!(SizeCalculator.format(0), "Zero bytes");
    }

    #[test]
    fn test_format_small_values_in_bytes() {
        assert_eq!(format_size(512), "512 B");
    }

    #[test]
    fn test_format_uses_binary_units() {
        let formatted = format_size(5 * 1024 * 1024);
        assert!(formatted.starts_with("5.0"), "{formatted}");
        assert!(formatted.ends_with("MiB"), "{formatted}");

        let gigs = format_size(3 * 1024 * 1024 * 1024);
        assert!(gigs.ends_with("GiB"), "{gigs}");
    }
}
