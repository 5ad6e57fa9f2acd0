//! E2E tests for the files a run produces

use super::common::{BASENAME, TEST_FILES, run_stubbed, stub_disk_image};
use fondscan_harness::stubs::installed;
use fondscan_harness::{ExpectedLayout, Invocation, Mode, OutputFixture, is_non_zero_file};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_outputs_created() {
    let run = run_stubbed(Path::new(TEST_FILES), Mode::NoVirusScan, &[]);

    assert!(run.output.status.success(), "{}", run.output.stderr);
    ExpectedLayout::standard(BASENAME).assert_satisfied(run.fixture.root());
}

#[test]
fn test_outputs_created_for_disk_image() {
    let images = TempDir::new().unwrap();
    let image = stub_disk_image(images.path());
    let run = run_stubbed(&image, Mode::DiskImageNoVirusScan, &[]);

    assert!(run.output.status.success(), "{}", run.output.stderr);
    ExpectedLayout::disk_image(BASENAME)
        .with_non_empty_file(Path::new(BASENAME).join("carved_files/file1.txt.txt"))
        .with_non_empty_file(Path::new(BASENAME).join("carved_files/Tulips.jpg"))
        .assert_satisfied(run.fixture.root());
}

#[test]
fn test_temp_files_deleted() {
    let run = run_stubbed(Path::new(TEST_FILES), Mode::NoVirusScan, &[]);

    assert!(run.output.status.success(), "{}", run.output.stderr);
    ExpectedLayout::cleaned_up(BASENAME).assert_satisfied(run.fixture.root());
}

#[test]
fn test_removefiles_deletes_carved_files() {
    let images = TempDir::new().unwrap();
    let image = stub_disk_image(images.path());
    let run = run_stubbed(&image, Mode::DiskImageNoVirusScan, &["-r"]);

    assert!(run.output.status.success(), "{}", run.output.stderr);
    assert!(is_non_zero_file(&run.output_dir().join("dfxml.xml")));
    assert!(!run.output_dir().join("carved_files").exists());
}

#[test]
fn test_reports_describe_test_files() {
    let run = run_stubbed(Path::new(TEST_FILES), Mode::NoVirusScan, &[]);
    assert!(run.output.status.success(), "{}", run.output.stderr);

    let reports = run.output_dir().join("csv_reports");
    let formats = fs::read_to_string(reports.join("formats.csv")).unwrap();
    assert!(formats.contains("x-fmt/111"));
    assert!(formats.contains("fmt/43"));

    // letter1.txt and letter2.txt have identical contents
    let duplicates = fs::read_to_string(reports.join("duplicates.csv")).unwrap();
    assert!(duplicates.contains("letter1.txt"));
    assert!(duplicates.contains("letter2.txt"));
    assert!(!duplicates.contains("minutes.txt"));

    let html = fs::read_to_string(run.output_dir().join(format!("{BASENAME}.html"))).unwrap();
    assert!(html.contains("siegfried 1.11.0 (stub)"));
}

#[test]
fn test_sha256_column() {
    let run = run_stubbed(Path::new(TEST_FILES), Mode::NoVirusScan, &["--hash", "sha256"]);

    // the stub always labels its checksum column md5; the reader falls back to it
    assert!(run.output.status.success(), "{}", run.output.stderr);
    ExpectedLayout::standard(BASENAME).assert_satisfied(run.fixture.root());
}

#[test]
fn test_outputs_created_with_real_tools() {
    if !installed("sf") {
        eprintln!("sf not installed; skipping");
        return;
    }
    let fixture = OutputFixture::new().unwrap();
    let output = Invocation::new(super::common::CLI_BINARY, TEST_FILES, fixture.root(), BASENAME)
        .mode(Mode::NoVirusScan)
        .run()
        .unwrap();

    assert!(output.status.success(), "{}", output.stderr);
    ExpectedLayout::standard(BASENAME).assert_satisfied(fixture.root());
    ExpectedLayout::cleaned_up(BASENAME).assert_satisfied(fixture.root());
}
