//! Integration tests for appsweep
//!
//! These tests drive discovery, sizing and removal sessions against real
//! directory trees, with the trash and the terminal replaced by fakes.

use appsweep::app_info::AppInfo;
use appsweep::app_lister::AppLister;
use appsweep::config::Config;
use appsweep::finder::{annotate_sizes, AssociatedFileFinder};
use appsweep::fs_provider::LocalFileSystem;
use appsweep::interaction::TerminalPrompt;
use appsweep::manifest::ManifestWriter;
use appsweep::orchestrator::{RemovalOrchestrator, CANCEL_OPTION, REMOVE_ALL_OPTION, SELECT_ITEMS_OPTION};
use appsweep::size::SizeCalculator;
use appsweep::testing::{FixedVendorCheck, RecordingTrash, ScriptedInteraction};
use appsweep::types::{AssociatedItem, UninstallAction, UninstallOptions};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// A fake home with a Zoom install and a few leftovers.
///
/// Sizes: app bundle 4000, caches dir 300, prefs plist 50, log dir 25.
fn create_zoom_home(home: &Path) -> AppInfo {
    let app = home.join("Applications").join("Zoom.app");
    fs::create_dir_all(app.join("Contents")).unwrap();
    fs::write(app.join("Contents").join("zoom"), vec![0u8; 4000]).unwrap();

    let caches = home.join("Library/Caches/us.zoom.xos");
    fs::create_dir_all(&caches).unwrap();
    fs::write(caches.join("a.db"), vec![0u8; 100]).unwrap();
    fs::write(caches.join("b.db"), vec![0u8; 200]).unwrap();

    let prefs = home.join("Library/Preferences");
    fs::create_dir_all(&prefs).unwrap();
    fs::write(prefs.join("us.zoom.xos.plist"), vec![0u8; 50]).unwrap();
    fs::write(prefs.join("com.tinyspeck.slackmacgap.plist"), vec![0u8; 70]).unwrap();

    let logs = home.join("Library/Logs/zoom.us");
    fs::create_dir_all(&logs).unwrap();
    fs::write(logs.join("zoom.log"), vec![0u8; 25]).unwrap();

    AppInfo::new(app)
}

fn discover(home: &Path, app: &AppInfo) -> Vec<AssociatedItem> {
    let config = Config::default();
    let finder = AssociatedFileFinder::new(&LocalFileSystem, config.search_locations(home));
    let mut files = finder.find(app);
    annotate_sizes(&mut files, &SizeCalculator);
    files
}

fn names(files: &[AssociatedItem]) -> Vec<&str> {
    files.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_discovery_on_real_tree() {
    let temp_dir = create_test_dir();
    let app = create_zoom_home(temp_dir.path());

    let files = discover(temp_dir.path(), &app);

    // Root order: Caches, Logs, Preferences. Missing roots are skipped.
    assert_eq!(names(&files), vec!["us.zoom.xos", "zoom.us", "us.zoom.xos.plist"]);
    assert_eq!(files[0].location, "Caches");
    assert_eq!(files[1].location, "Logs");
    assert_eq!(files[2].location, "Preferences");
    assert!(files.iter().all(|f| f.app_name == "Zoom"));
    assert_eq!(
        files[0].path,
        temp_dir.path().join("Library/Caches/us.zoom.xos")
    );
}

#[test]
fn test_sizes_are_annotated() {
    let temp_dir = create_test_dir();
    let app = create_zoom_home(temp_dir.path());

    let files = discover(temp_dir.path(), &app);
    let sizes: Vec<Option<u64>> = files.iter().map(|f| f.size_bytes).collect();

    assert_eq!(sizes, vec![Some(300), Some(25), Some(50)]);
    assert_eq!(SizeCalculator.size(&app.path), 4000);
}

#[test]
fn test_hidden_files_do_not_count_toward_directory_size() {
    let temp_dir = create_test_dir();
    let dir = temp_dir.path().join("support");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("data.bin"), vec![0u8; 128]).unwrap();
    fs::write(dir.join(".DS_Store"), vec![0u8; 4096]).unwrap();

    assert_eq!(SizeCalculator.size(&dir), 128);
    assert_eq!(SizeCalculator.size(&temp_dir.path().join("missing")), 0);
}

#[test]
fn test_remove_all_moves_app_first_and_totals_everything() {
    let temp_dir = create_test_dir();
    let app = create_zoom_home(temp_dir.path());
    let files = discover(temp_dir.path(), &app);

    let port = ScriptedInteraction::new()
        .choose(REMOVE_ALL_OPTION)
        .confirm_with(true);
    let trash = RecordingTrash::new();
    let mut orchestrator = RemovalOrchestrator::new(&port, &trash, UninstallOptions::default());

    let report = orchestrator.run(&app, &files);
    let outcome = report.outcome.expect("batch ran");

    assert_eq!(report.action, UninstallAction::RemoveAll);
    assert!(!report.cancelled);
    assert_eq!(trash.attempted()[0], app.path);
    assert_eq!(trash.attempted().len(), 4);
    assert_eq!(
        outcome.succeeded_names,
        vec!["Zoom.app", "us.zoom.xos", "zoom.us", "us.zoom.xos.plist"]
    );
    assert_eq!(outcome.total_bytes_removed, 4000 + 300 + 25 + 50);
    assert!(!outcome.has_failures());
}

#[test]
fn test_dry_run_writes_manifest_and_touches_nothing() {
    let temp_dir = create_test_dir();
    let app = create_zoom_home(temp_dir.path());
    let files = discover(temp_dir.path(), &app);
    let log_root = temp_dir.path().join("logs");

    let port = ScriptedInteraction::new()
        .choose(REMOVE_ALL_OPTION)
        .confirm_with(true);
    let trash = RecordingTrash::new();
    let options = UninstallOptions {
        dry_run: true,
        force: false,
        create_log: true,
    };
    let mut orchestrator = RemovalOrchestrator::new(&port, &trash, options)
        .with_manifest_writer(ManifestWriter::new(&log_root));

    let report = orchestrator.run(&app, &files);

    assert!(trash.attempted().is_empty());
    assert!(app.path.exists());
    let outcome = report.outcome.expect("batch ran");
    assert_eq!(outcome.succeeded_names.len(), 4);
    assert_eq!(outcome.total_bytes_removed, 4375);

    let manifest = report.manifest_path.expect("manifest written");
    assert!(manifest.starts_with(&log_root));
    assert!(manifest
        .file_name()
        .unwrap()
        .to_string_lossy()
        .ends_with("-Zoom-uninstall.log"));

    let contents = fs::read_to_string(&manifest).unwrap();
    assert!(contents.starts_with("Uninstall Log for Zoom"));
    assert!(contents.contains("Dry Run: true"));
    assert!(contents.contains("- Zoom.app"));
    assert!(contents.contains(&format!("  Path: {}", files[0].path.display())));
}

#[test]
fn test_cancel_leaves_everything_in_place() {
    let temp_dir = create_test_dir();
    let app = create_zoom_home(temp_dir.path());
    let files = discover(temp_dir.path(), &app);
    let log_root = temp_dir.path().join("logs");

    let port = ScriptedInteraction::new().choose(CANCEL_OPTION);
    let trash = RecordingTrash::new();
    let options = UninstallOptions {
        create_log: true,
        ..UninstallOptions::default()
    };
    let mut orchestrator = RemovalOrchestrator::new(&port, &trash, options)
        .with_manifest_writer(ManifestWriter::new(&log_root));

    let report = orchestrator.run(&app, &files);

    assert!(report.cancelled);
    assert!(report.outcome.is_none());
    assert!(trash.attempted().is_empty());
    assert!(!log_root.exists());
}

#[test]
fn test_selecting_only_files_keeps_app_out_of_total() {
    let temp_dir = create_test_dir();
    let app = create_zoom_home(temp_dir.path());
    let files = discover(temp_dir.path(), &app);

    let port = ScriptedInteraction::new()
        .choose(SELECT_ITEMS_OPTION)
        .select(&["us.zoom.xos", "us.zoom.xos.plist"])
        .confirm_with(true);
    let trash = RecordingTrash::new();
    let mut orchestrator = RemovalOrchestrator::new(&port, &trash, UninstallOptions::default());

    let report = orchestrator.run(&app, &files);
    let outcome = report.outcome.expect("batch ran");

    assert_eq!(report.action, UninstallAction::SelectItems);
    assert!(!trash.attempted().contains(&app.path));
    assert_eq!(outcome.succeeded_names, vec!["us.zoom.xos", "us.zoom.xos.plist"]);
    assert_eq!(outcome.total_bytes_removed, 350);
}

#[test]
fn test_one_failure_does_not_stop_the_batch() {
    let temp_dir = create_test_dir();
    let app = create_zoom_home(temp_dir.path());
    let files = discover(temp_dir.path(), &app);
    let locked = files[0].path.clone();

    let port = ScriptedInteraction::new();
    let trash = RecordingTrash::new().fail_on(&locked);
    let options = UninstallOptions {
        force: true,
        ..UninstallOptions::default()
    };
    let mut orchestrator = RemovalOrchestrator::new(&port, &trash, options);

    let report = orchestrator.run(&app, &files);
    let outcome = report.outcome.expect("batch ran");

    assert!(port.calls().is_empty());
    assert_eq!(trash.attempted().len(), 4);
    assert_eq!(outcome.failed_entries.len(), 1);
    assert_eq!(outcome.failed_entries[0].path, locked);
    assert_eq!(outcome.failed_entries[0].reason, "permission denied");
    assert_eq!(outcome.succeeded_names, vec!["Zoom.app", "zoom.us", "us.zoom.xos.plist"]);
    assert_eq!(outcome.total_bytes_removed, 4000 + 25 + 50);
    assert!(!report.notices.is_empty());
}

#[test]
fn test_terminal_prompt_drives_a_session() {
    let temp_dir = create_test_dir();
    let app = create_zoom_home(temp_dir.path());
    let files = discover(temp_dir.path(), &app);

    // Pick "Remove all items" by number, then confirm.
    let prompt = TerminalPrompt::new(Cursor::new(b"1\ny\n".to_vec()), Vec::new());
    let trash = RecordingTrash::new();
    let report = {
        let mut orchestrator =
            RemovalOrchestrator::new(&prompt, &trash, UninstallOptions::default());
        orchestrator.run(&app, &files)
    };

    assert_eq!(report.action, UninstallAction::RemoveAll);
    assert_eq!(trash.moved().len(), 4);

    let transcript = String::from_utf8(prompt.into_output()).unwrap();
    assert!(transcript.contains("3 additional files found. What would you like to do?"));
    assert!(transcript.contains("Confirmation: Move all 4 items to trash?"));
}

#[test]
fn test_app_lister_reads_real_directory() {
    let temp_dir = create_test_dir();
    let apps_dir = temp_dir.path().join("Applications");
    for name in ["Safari.app", "Discord.app", "zoom.us.app", "Utilities"] {
        fs::create_dir_all(apps_dir.join(name)).unwrap();
    }

    let vendor = FixedVendorCheck::new(&["Safari.app"]);
    let lister = AppLister::new(&LocalFileSystem, &vendor, &apps_dir);
    let apps = lister.list_third_party_apps().unwrap();

    let listed: Vec<&str> = apps.iter().map(|a| a.full_name.as_str()).collect();
    assert_eq!(listed, vec!["Discord.app", "zoom.us.app"]);
}

#[test]
fn test_config_round_trip_and_search_roots() {
    let temp_dir = create_test_dir();
    let path = temp_dir.path().join("appsweep").join("config.toml");

    let mut config = Config::default();
    config.apply_cli_overrides(Some(PathBuf::from("/Volumes/Apps")));
    config.paths.log_dir = Some("uninstall-logs".to_string());
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path);
    assert_eq!(loaded, config);
    assert_eq!(loaded.applications_dir(), PathBuf::from("/Volumes/Apps"));

    let home = Path::new("/Users/test");
    assert_eq!(loaded.log_root(home), home.join("uninstall-logs"));
    let roots = loaded.search_locations(home);
    assert_eq!(roots.len(), 6);
    assert_eq!(roots[0].path, home.join("Library/Application Support"));
}
