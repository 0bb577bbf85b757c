//! Installed application listing.

use crate::app_info::{is_app_bundle_name, AppInfo};
use crate::error::AppError;
use crate::fs_provider::FileSystemProvider;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Decides whether an app ships from the platform vendor and should be hidden.
pub trait VendorCheck {
    fn is_vendor_app(&self, app_path: &Path) -> bool;
}

/// Vendor check based on the signing authority reported by `codesign -dv`.
///
/// Any failure to run `codesign` counts as "not a vendor app", so the app
/// stays visible.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodesignCheck;

impl VendorCheck for CodesignCheck {
    fn is_vendor_app(&self, app_path: &Path) -> bool {
        let output = match Command::new("codesign").arg("-dv").arg(app_path).output() {
            Ok(output) => output,
            Err(err) => {
                log::debug!("codesign unavailable for {}: {}", app_path.display(), err);
                return false;
            }
        };

        // codesign prints its details on stderr.
        let details = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        is_vendor_signature(&details)
    }
}

fn is_vendor_signature(codesign_output: &str) -> bool {
    codesign_output.contains("Apple")
}

pub struct AppLister<'a, F: FileSystemProvider + ?Sized, V: VendorCheck + ?Sized> {
    fs: &'a F,
    vendor_check: &'a V,
    applications_dir: PathBuf,
}

impl<'a, F: FileSystemProvider + ?Sized, V: VendorCheck + ?Sized> AppLister<'a, F, V> {
    pub fn new(fs: &'a F, vendor_check: &'a V, applications_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            vendor_check,
            applications_dir: applications_dir.into(),
        }
    }

    /// Third-party `.app` bundles in the applications directory, sorted by name.
    pub fn list_third_party_apps(&self) -> Result<Vec<AppInfo>, AppError> {
        let mut names = self
            .fs
            .list_entries(&self.applications_dir)
            .map_err(|source| AppError::ApplicationsUnreadable {
                path: self.applications_dir.clone(),
                source,
            })?;
        names.retain(|name| is_app_bundle_name(name));
        names.sort_by_key(|name| name.to_lowercase());

        Ok(names
            .into_iter()
            .map(|name| self.applications_dir.join(name))
            .filter(|path| !self.vendor_check.is_vendor_app(path))
            .map(AppInfo::new)
            .collect())
    }
}
