//! Test fixtures for temp workspaces and configurations.

use inq_core::config::AppConfig;
use tempfile::TempDir;

/// A disposable workspace with separate reports and logs directories.
///
/// Returns a TempDir that must be kept alive for the test duration.
pub fn test_workspace() -> TempDir {
    tempfile::tempdir().expect("failed to create temp workspace")
}

/// An AppConfig pointed at the given workspace.
#[allow(dead_code)]
pub fn test_config(workspace: &TempDir) -> AppConfig {
    AppConfig {
        reports_dir: workspace.path().join("outputs"),
        logs_dir: workspace.path().join("logs"),
        ..AppConfig::default()
    }
}

/// Filenames of all report artifacts in the workspace, sorted.
#[allow(dead_code)]
pub fn report_files(workspace: &TempDir) -> Vec<String> {
    let outputs = workspace.path().join("outputs");
    if !outputs.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = std::fs::read_dir(outputs)
        .expect("failed to read outputs dir")
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Filenames of all exported session files in the workspace, sorted.
#[allow(dead_code)]
pub fn session_files(workspace: &TempDir) -> Vec<String> {
    let logs = workspace.path().join("logs");
    if !logs.exists() {
        return Vec::new();
    }
    let mut names: Vec<String> = std::fs::read_dir(logs)
        .expect("failed to read logs dir")
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
