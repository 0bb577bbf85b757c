//! appsweep library crate
//!
//! This crate provides both a CLI binary and a library API for finding and
//! removing the files an application leaves behind.

pub mod app_info;
pub mod app_lister;
pub mod cli;
pub mod config;
pub mod error;
pub mod finder;
pub mod fs_provider;
pub mod interaction;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod size;
pub mod testing;
pub mod theme;
pub mod trash_ops;
pub mod types;
