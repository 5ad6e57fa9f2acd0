//! What a single characterization run was asked to do.

use crate::error::{FondscanError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Checksum algorithm handed to siegfried.
///
/// The same name is used for the `-hash` flag and for the CSV column header
/// siegfried emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = FondscanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            other => Err(FondscanError::invalid_input(format!(
                "unsupported hash algorithm '{other}' (expected md5, sha1, sha256 or sha512)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory to characterize, or the disk image when `disk_image` is set
    pub source: PathBuf,
    /// Parent directory for the output folder
    pub destination: PathBuf,
    /// Name of the output folder and of the HTML report
    pub basename: String,
    pub virus_scan: bool,
    pub disk_image: bool,
    /// Recover allocated files only from a disk image
    pub allocated_only: bool,
    /// Delete `carved_files/` once reporting is done
    pub remove_carved: bool,
    pub scan_archives: bool,
    /// Raise clamscan's size limits so large files are scanned in full
    pub large_files: bool,
    pub overwrite: bool,
    pub hash: HashAlgorithm,
}

impl RunOptions {
    #[must_use]
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        basename: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            basename: basename.into(),
            virus_scan: true,
            disk_image: false,
            allocated_only: false,
            remove_carved: false,
            scan_archives: false,
            large_files: false,
            overwrite: false,
            hash: HashAlgorithm::default(),
        }
    }

    /// Check the options against the filesystem before any tool runs
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the basename is not a plain folder name,
    /// the source is missing, the source kind does not match the mode, or the
    /// output folder and the source overlap
    pub fn validate(&self) -> Result<()> {
        let name = self.basename.as_str();
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(FondscanError::invalid_input(format!(
                "basename '{name}' must be a plain folder name"
            )));
        }

        if !self.source.exists() {
            return Err(FondscanError::invalid_input(format!(
                "source {} does not exist",
                self.source.display()
            )));
        }

        if self.disk_image && self.source.is_dir() {
            return Err(FondscanError::invalid_input(format!(
                "{} is a directory, but disk image mode expects an image file",
                self.source.display()
            )));
        }

        if !self.disk_image && !self.source.is_dir() {
            return Err(FondscanError::invalid_input(format!(
                "{} is not a directory (use -d for disk images)",
                self.source.display()
            )));
        }

        self.check_no_overlap()
    }

    /// The output folder is removed by `--overwrite` and is not scanned, so
    /// it must neither contain the source nor sit inside it.
    fn check_no_overlap(&self) -> Result<()> {
        let source = self
            .source
            .canonicalize()
            .map_err(|e| FondscanError::io(&self.source, e))?;
        let output = resolve(&self.destination.join(&self.basename))?;

        if source.starts_with(&output) {
            return Err(FondscanError::invalid_input(format!(
                "output folder {} would contain the source {}",
                output.display(),
                source.display()
            )));
        }
        if output.starts_with(&source) {
            return Err(FondscanError::invalid_input(format!(
                "output folder {} is inside the source {}",
                output.display(),
                source.display()
            )));
        }
        Ok(())
    }
}

/// Canonical form of `path`, which need not exist yet: the deepest existing
/// ancestor is canonicalized and the missing components are appended.
fn resolve(path: &Path) -> Result<PathBuf> {
    let mut missing = Vec::new();
    let mut current = path;
    loop {
        let lookup = if current.as_os_str().is_empty() {
            Path::new(".")
        } else {
            current
        };
        match lookup.canonicalize() {
            Ok(mut resolved) => {
                resolved.extend(missing.iter().rev());
                return Ok(resolved);
            }
            Err(e) => match (current.parent(), current.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    current = parent;
                }
                _ => return Err(FondscanError::io(path, e)),
            },
        }
    }
}
