//! Application identity.

use serde::Serialize;
use std::path::{Path, PathBuf};

const APP_BUNDLE_SUFFIX: &str = ".app";

/// An installed application, identified by its bundle path.
///
/// The short name is what discovery matches against: the bundle name with a
/// trailing `.app` removed. Names such as `CleanMyMac_5_MAS.app` keep every
/// underscore-delimited token, so `CleanMyMac_5_MAS` is the match key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub path: PathBuf,
    pub full_name: String,
    pub short_name: String,
}

impl AppInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Self {
                path,
                full_name: String::new(),
                short_name: String::new(),
            };
        }

        let full_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let short_name = full_name
            .strip_suffix(APP_BUNDLE_SUFFIX)
            .unwrap_or(&full_name)
            .to_string();

        Self {
            path,
            full_name,
            short_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// True if a directory entry name looks like an application bundle.
pub fn is_app_bundle_name(name: &str) -> bool {
    name.ends_with(APP_BUNDLE_SUFFIX)
}
