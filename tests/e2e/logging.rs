//! E2E tests for the `[logging]` configuration and `-v`

use super::common::{TEST_FILES, run_stubbed};
use fondscan_harness::Mode;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(dir: &TempDir, level: &str) -> (PathBuf, PathBuf) {
    let log = dir.path().join("fondscan.log");
    let config = dir.path().join("fondscan.toml");
    fs::write(
        &config,
        format!("[logging]\nlevel = \"{level}\"\nfile = \"{}\"\n", log.display()),
    )
    .unwrap();
    (config, log)
}

#[test]
fn test_log_file_from_config() {
    let dir = TempDir::new().unwrap();
    let (config, log) = write_config(&dir, "info");

    let run = run_stubbed(
        Path::new(TEST_FILES),
        Mode::NoVirusScan,
        &["-c", config.to_str().unwrap()],
    );

    assert!(run.output.status.success(), "{}", run.output.stderr);
    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("[INFO ]"));
    assert!(text.contains("HTML report written to"));
    assert!(!text.contains("[DEBUG]"));
}

#[test]
fn test_verbose_logs_tool_command_lines() {
    let dir = TempDir::new().unwrap();
    let (config, log) = write_config(&dir, "warn");

    let run = run_stubbed(
        Path::new(TEST_FILES),
        Mode::NoVirusScan,
        &["-c", config.to_str().unwrap(), "-v"],
    );

    assert!(run.output.status.success(), "{}", run.output.stderr);
    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("[DEBUG]"));
    assert!(text.contains("running: sf -csv -hash md5"));
}

#[test]
fn test_removefiles_on_directory_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (config, log) = write_config(&dir, "info");

    let run = run_stubbed(
        Path::new(TEST_FILES),
        Mode::NoVirusScan,
        &["-c", config.to_str().unwrap(), "-r"],
    );

    assert!(run.output.status.success(), "{}", run.output.stderr);
    assert!(Path::new(TEST_FILES).join("minutes.txt").is_file());
    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("--removefiles only applies to disk images"));
}
