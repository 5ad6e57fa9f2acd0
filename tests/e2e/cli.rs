//! E2E tests for argument handling and error reporting

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help_lists_flags() {
    assert_cmd::cargo_bin_cmd!("fondscan")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--noclam"))
        .stdout(predicate::str::contains("--diskimage"))
        .stdout(predicate::str::contains("BASENAME"));
}

#[test]
fn test_version() {
    assert_cmd::cargo_bin_cmd!("fondscan")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("fondscan "));
}

#[test]
fn test_missing_arguments() {
    assert_cmd::cargo_bin_cmd!("fondscan")
        .arg("only-source")
        .assert()
        .failure();
}

#[test]
fn test_nonexistent_source() {
    let out = TempDir::new().unwrap();
    assert_cmd::cargo_bin_cmd!("fondscan")
        .arg("/nonexistent/fondscan/source")
        .arg(out.path())
        .arg("test")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERR_INVALID_INPUT"));
    assert!(!out.path().join("test").exists());
}

#[test]
fn test_directory_given_as_disk_image() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    assert_cmd::cargo_bin_cmd!("fondscan")
        .arg("-d")
        .arg(source.path())
        .arg(out.path())
        .arg("test")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERR_INVALID_INPUT"));
}

#[test]
fn test_existing_output_folder() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    fs::create_dir(out.path().join("test")).unwrap();
    fs::write(out.path().join("test/keep.txt"), "keep").unwrap();

    assert_cmd::cargo_bin_cmd!("fondscan")
        .arg("-n")
        .arg(source.path())
        .arg(out.path())
        .arg("test")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERR_OUTPUT_EXISTS"));
    assert!(out.path().join("test/keep.txt").exists());
}

#[test]
fn test_bad_basename() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    assert_cmd::cargo_bin_cmd!("fondscan")
        .arg("-n")
        .arg(source.path())
        .arg(out.path())
        .arg("a/b")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("basename"));
}

#[test]
fn test_unreadable_config() {
    let source = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    assert_cmd::cargo_bin_cmd!("fondscan")
        .args(["-c", "/nonexistent/fondscan.toml"])
        .arg(source.path())
        .arg(out.path())
        .arg("test")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERR_CONFIG"));
}
