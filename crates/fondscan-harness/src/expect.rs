//! Expected output files and the checks run against them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// CSV reports every run must leave in `csv_reports/`
pub const CSV_REPORTS: [&str; 8] = [
    "duplicates.csv",
    "errors.csv",
    "formats.csv",
    "formatVersions.csv",
    "mimetypes.csv",
    "unidentified.csv",
    "warnings.csv",
    "years.csv",
];

/// True if `path` is a regular file with at least one byte
#[must_use]
pub fn is_non_zero_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file() && m.len() > 0)
}

fn is_non_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_some())
}

/// # Errors
///
/// Returns an error if the log cannot be read
pub fn log_contains(path: &Path, needle: &str) -> io::Result<bool> {
    Ok(fs::read_to_string(path)?.contains(needle))
}

/// Panic unless the file at `path` contains `needle`
pub fn assert_log_contains(path: &Path, needle: &str) {
    match log_contains(path, needle) {
        Ok(true) => {}
        Ok(false) => panic!("{} does not contain {needle:?}", path.display()),
        Err(e) => panic!("cannot read {}: {e}", path.display()),
    }
}

/// What a run is expected to leave under the output root.
///
/// All paths are relative to the output root, so one expectation can be
/// checked against any fixture.
#[derive(Debug, Clone, Default)]
pub struct ExpectedLayout {
    non_empty_files: Vec<PathBuf>,
    present_files: Vec<PathBuf>,
    non_empty_dirs: Vec<PathBuf>,
    absent: Vec<PathBuf>,
}

impl ExpectedLayout {
    /// Outputs of a directory run named `basename`
    #[must_use]
    pub fn standard(basename: &str) -> Self {
        let base = PathBuf::from(basename);
        let mut layout = Self::default()
            .with_non_empty_file(base.join("siegfried.csv"))
            .with_non_empty_file(base.join("siegfried.sqlite"))
            .with_non_empty_file(base.join(format!("{basename}.html")));
        for report in CSV_REPORTS {
            layout = layout.with_non_empty_file(base.join("csv_reports").join(report));
        }
        if !cfg!(windows) {
            layout = layout.with_present_file(base.join("tree.txt"));
        }
        layout
    }

    /// Outputs of a disk image run: the standard set plus DFXML and carved files
    #[must_use]
    pub fn disk_image(basename: &str) -> Self {
        let base = PathBuf::from(basename);
        Self::standard(basename)
            .with_non_empty_file(base.join("dfxml.xml"))
            .with_non_empty_dir(base.join("carved_files"))
    }

    /// Staging files that must be gone once a run has finished
    #[must_use]
    pub fn cleaned_up(basename: &str) -> Self {
        let base = PathBuf::from(basename);
        Self::default()
            .with_absent(base.join("temp.html"))
            .with_absent(base.join("csv_reports").join("uniqueyears.csv"))
    }

    #[must_use]
    pub fn with_non_empty_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.non_empty_files.push(path.into());
        self
    }

    /// Require existence only; the file may be empty
    #[must_use]
    pub fn with_present_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.present_files.push(path.into());
        self
    }

    #[must_use]
    pub fn with_non_empty_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.non_empty_dirs.push(path.into());
        self
    }

    #[must_use]
    pub fn with_absent(mut self, path: impl Into<PathBuf>) -> Self {
        self.absent.push(path.into());
        self
    }

    /// Every unmet expectation, described
    #[must_use]
    pub fn missing(&self, root: &Path) -> Vec<String> {
        let mut problems = Vec::new();
        for rel in &self.non_empty_files {
            if !is_non_zero_file(&root.join(rel)) {
                problems.push(format!("missing or empty file: {}", rel.display()));
            }
        }
        for rel in &self.present_files {
            if !root.join(rel).is_file() {
                problems.push(format!("missing file: {}", rel.display()));
            }
        }
        for rel in &self.non_empty_dirs {
            if !is_non_empty_dir(&root.join(rel)) {
                problems.push(format!("missing or empty directory: {}", rel.display()));
            }
        }
        for rel in &self.absent {
            if root.join(rel).exists() {
                problems.push(format!("should not exist: {}", rel.display()));
            }
        }
        problems
    }

    /// Panic listing every unmet expectation under `root`
    pub fn assert_satisfied(&self, root: &Path) {
        let problems = self.missing(root);
        assert!(
            problems.is_empty(),
            "unexpected output under {}:\n  {}",
            root.display(),
            problems.join("\n  ")
        );
    }
}
