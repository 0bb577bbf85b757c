use crate::finder::SearchLocation;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: Search,

    #[serde(default)]
    pub paths: Paths,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Search {
    /// Library directories scanned for leftovers, in scan order.
    /// Relative paths are resolved against the home directory.
    #[serde(default = "default_roots")]
    pub roots: Vec<SearchRoot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRoot {
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paths {
    #[serde(default = "default_applications_dir")]
    pub applications_dir: String,

    /// Where uninstall manifests are written. Defaults to `~/Library/Logs/appsweep`.
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for Search {
    fn default() -> Self {
        Self {
            roots: default_roots(),
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            applications_dir: default_applications_dir(),
            log_dir: None,
        }
    }
}

fn default_roots() -> Vec<SearchRoot> {
    [
        ("Application Support", "Library/Application Support"),
        ("Caches", "Library/Caches"),
        ("Logs", "Library/Logs"),
        ("Preferences", "Library/Preferences"),
        ("Containers", "Library/Containers"),
        ("Cookies", "Library/Cookies"),
    ]
    .into_iter()
    .map(|(label, path)| SearchRoot {
        label: label.to_string(),
        path: path.to_string(),
    })
    .collect()
}

fn default_applications_dir() -> String {
    "/Applications".to_string()
}

impl Config {
    /// Get the config file path, e.g. `~/Library/Application Support/appsweep/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "appsweep")
            .context("Could not determine the config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load config from file or return defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            _ => Self::default(),
        }
    }

    /// Load config from an explicit path, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Failed to parse config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, toml).context("Failed to write config file")?;

        Ok(())
    }

    /// Apply CLI option overrides
    pub fn apply_cli_overrides(&mut self, applications_dir: Option<PathBuf>) {
        if let Some(dir) = applications_dir {
            self.paths.applications_dir = dir.to_string_lossy().into_owned();
        }
    }

    /// Resolve the configured search roots against a home directory
    pub fn search_locations(&self, home: &Path) -> Vec<SearchLocation> {
        self.search
            .roots
            .iter()
            .map(|root| SearchLocation::new(home.join(&root.path), &root.label))
            .collect()
    }

    pub fn applications_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.applications_dir)
    }

    pub fn log_root(&self, home: &Path) -> PathBuf {
        match &self.paths.log_dir {
            Some(dir) => home.join(dir),
            None => home.join("Library").join("Logs").join("appsweep"),
        }
    }
}
