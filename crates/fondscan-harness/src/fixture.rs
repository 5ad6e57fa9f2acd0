//! Per-test output directory.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary output root, deleted when the fixture is dropped (also when the
/// test panics)
#[derive(Debug)]
pub struct OutputFixture {
    dir: TempDir,
}

impl OutputFixture {
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("fondscan-out-").tempdir()?;
        log::debug!("created output fixture {}", dir.path().display());
        Ok(Self { dir })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Folder the tool creates for `basename`
    #[must_use]
    pub fn output_dir(&self, basename: &str) -> PathBuf {
        self.root().join(basename)
    }
}
