//! Leftover discovery.
//!
//! Scans the configured library roots and keeps every entry whose name
//! contains the app's short name, ignoring case. Discovery is best-effort:
//! a root that cannot be listed contributes nothing and is never an error.

use crate::app_info::AppInfo;
use crate::fs_provider::FileSystemProvider;
use crate::size::SizeCalculator;
use crate::types::AssociatedItem;
use std::path::PathBuf;

/// A directory scanned for leftovers, with the label shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLocation {
    pub path: PathBuf,
    pub label: String,
}

impl SearchLocation {
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

pub struct AssociatedFileFinder<'a, F: FileSystemProvider + ?Sized> {
    fs: &'a F,
    locations: Vec<SearchLocation>,
}

impl<'a, F: FileSystemProvider + ?Sized> AssociatedFileFinder<'a, F> {
    pub fn new(fs: &'a F, locations: Vec<SearchLocation>) -> Self {
        Self { fs, locations }
    }

    pub fn locations(&self) -> &[SearchLocation] {
        &self.locations
    }

    /// Find items in every search root whose name contains `app.short_name`.
    ///
    /// Results keep root order, then listing order within a root. Nothing is
    /// deduplicated and sizes are left unset.
    pub fn find(&self, app: &AppInfo) -> Vec<AssociatedItem> {
        if app.short_name.is_empty() {
            return Vec::new();
        }

        let needle = app.short_name.to_lowercase();
        let mut found = Vec::new();

        for location in &self.locations {
            let entries = match self.fs.list_entries(&location.path) {
                Ok(entries) => entries,
                Err(err) => {
                    log::debug!(
                        "skipping search root {}: {}",
                        location.path.display(),
                        err
                    );
                    continue;
                }
            };

            found.extend(
                entries
                    .into_iter()
                    .filter(|name| name.to_lowercase().contains(&needle))
                    .map(|name| AssociatedItem {
                        path: location.path.join(&name),
                        name,
                        location: location.label.clone(),
                        app_name: app.short_name.clone(),
                        size_bytes: None,
                    }),
            );
        }

        log::debug!(
            "found {} associated item(s) for {} across {} root(s)",
            found.len(),
            app.short_name,
            self.locations.len()
        );
        found
    }
}

/// Fill in `size_bytes` for every item.
pub fn annotate_sizes(items: &mut [AssociatedItem], calculator: &SizeCalculator) {
    for item in items.iter_mut() {
        item.size_bytes = Some(calculator.size(&item.path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFileSystem;
    use std::collections::HashSet;
    use std::io;

    fn locations() -> Vec<SearchLocation> {
        vec![
            SearchLocation::new("/home/Library/Application Support", "Application Support"),
            SearchLocation::new("/home/Library/Caches", "Caches"),
            SearchLocation::new("/home/Library/Logs", "Logs"),
        ]
    }

    fn names(items: &[AssociatedItem]) -> HashSet<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_matches_substring_case_insensitively() {
        let fs = MemoryFileSystem::new()
            .with_dir(
                "/home/Library/Application Support",
                &["Discord", "Slack", "discord-helper"],
            )
            .with_dir("/home/Library/Caches", &["com.discord.Discord", "com.apple.Safari"]);
        let finder = AssociatedFileFinder::new(&fs, locations());

        let items = finder.find(&AppInfo::new("/Applications/Discord.app"));

        assert_eq!(
            names(&items),
            HashSet::from([
                "Discord".to_string(),
                "discord-helper".to_string(),
                "com.discord.Discord".to_string(),
            ])
        );
        let cache = items.iter().find(|i| i.name == "com.discord.Discord").unwrap();
        assert_eq!(cache.location, "Caches");
        assert_eq!(cache.app_name, "Discord");
        assert_eq!(
            cache.path,
            PathBuf::from("/home/Library/Caches/com.discord.Discord")
        );
        assert!(items.iter().all(|i| i.size_bytes.is_none()));
    }

    #[test]
    fn test_case_of_app_name_does_not_change_matches() {
        let fs = MemoryFileSystem::new()
            .with_dir("/home/Library/Caches", &["ZOOM.cache", "us.zoom.xos", "Zoomer"]);
        let finder = AssociatedFileFinder::new(&fs, locations());

        let lower = finder.find(&AppInfo::new("/Applications/zoom.app"));
        let upper = finder.find(&AppInfo::new("/Applications/ZOOM.app"));

        assert_eq!(lower.len(), 3);
        assert_eq!(names(&lower), names(&upper));
    }

    #[test]
    fn test_unreadable_roots_are_skipped() {
        let fs = MemoryFileSystem::new()
            .with_dir("/home/Library/Application Support", &["Notion"])
            .with_error("/home/Library/Caches", io::ErrorKind::PermissionDenied);
        let finder = AssociatedFileFinder::new(&fs, locations());

        // Logs is missing entirely, Caches is denied.
        let items = finder.find(&AppInfo::new("/Applications/Notion.app"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].location, "Application Support");
    }

    #[test]
    fn test_same_name_in_two_roots_is_not_deduplicated() {
        let fs = MemoryFileSystem::new()
            .with_dir("/home/Library/Application Support", &["Figma"])
            .with_dir("/home/Library/Caches", &["Figma"]);
        let finder = AssociatedFileFinder::new(&fs, locations());

        let items = finder.find(&AppInfo::new("/Applications/Figma.app"));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_repeated_discovery_is_stable() {
        let fs = MemoryFileSystem::new()
            .with_dir("/home/Library/Caches", &["com.spotify.client", "Spotify"]);
        let finder = AssociatedFileFinder::new(&fs, locations());
        let app = AppInfo::new("/Applications/Spotify.app");

        assert_eq!(names(&finder.find(&app)), names(&finder.find(&app)));
    }

    #[test]
    fn test_empty_short_name_matches_nothing() {
        let fs = MemoryFileSystem::new().with_dir("/home/Library/Caches", &["anything"]);
        let finder = AssociatedFileFinder::new(&fs, locations());

        assert!(finder.find(&AppInfo::new("")).is_empty());
    }
}
