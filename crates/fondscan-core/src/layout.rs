//! Output directory layout
//!
//! Every artifact a run produces lives under `<destination>/<basename>`:
//!
//! ```text
//! <basename>/
//!   siegfried.csv
//!   siegfried.sqlite
//!   <basename>.html
//!   tree.txt
//!   dfxml.xml            (disk image only)
//!   carved_files/        (disk image only)
//!   csv_reports/*.csv
//!   logs/viruscheck-log.txt
//! ```

use crate::error::{FondscanError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The CSV reports exported from the siegfried database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Formats,
    FormatVersions,
    MimeTypes,
    Years,
    Unidentified,
    Warnings,
    Errors,
    Duplicates,
}

impl ReportKind {
    pub const ALL: [Self; 8] = [
        Self::Formats,
        Self::FormatVersions,
        Self::MimeTypes,
        Self::Years,
        Self::Unidentified,
        Self::Warnings,
        Self::Errors,
        Self::Duplicates,
    ];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Formats => "formats.csv",
            Self::FormatVersions => "formatVersions.csv",
            Self::MimeTypes => "mimetypes.csv",
            Self::Years => "years.csv",
            Self::Unidentified => "unidentified.csv",
            Self::Warnings => "warnings.csv",
            Self::Errors => "errors.csv",
            Self::Duplicates => "duplicates.csv",
        }
    }

    /// Heading used for the report's section in the HTML report
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Formats => "File formats",
            Self::FormatVersions => "File format versions",
            Self::MimeTypes => "MIME types",
            Self::Years => "Last modified dates by year",
            Self::Unidentified => "Unidentified",
            Self::Warnings => "Siegfried warnings",
            Self::Errors => "Siegfried errors",
            Self::Duplicates => "Duplicates",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    basename: String,
}

impl OutputLayout {
    #[must_use]
    pub fn new(destination: &Path, basename: &str) -> Self {
        Self {
            root: destination.join(basename),
            basename: basename.to_string(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn basename(&self) -> &str {
        &self.basename
    }

    #[must_use]
    pub fn siegfried_csv(&self) -> PathBuf {
        self.root.join("siegfried.csv")
    }

    #[must_use]
    pub fn siegfried_db(&self) -> PathBuf {
        self.root.join("siegfried.sqlite")
    }

    #[must_use]
    pub fn html_report(&self) -> PathBuf {
        self.root.join(format!("{}.html", self.basename))
    }

    /// Staging file for the HTML report, renamed into place when complete
    #[must_use]
    pub fn temp_html(&self) -> PathBuf {
        self.root.join("temp.html")
    }

    #[must_use]
    pub fn csv_reports(&self) -> PathBuf {
        self.root.join("csv_reports")
    }

    #[must_use]
    pub fn report(&self, kind: ReportKind) -> PathBuf {
        self.csv_reports().join(kind.file_name())
    }

    #[must_use]
    pub fn tree(&self) -> PathBuf {
        self.root.join("tree.txt")
    }

    #[must_use]
    pub fn logs(&self) -> PathBuf {
        self.root.join("logs")
    }

    #[must_use]
    pub fn virus_log(&self) -> PathBuf {
        self.logs().join("viruscheck-log.txt")
    }

    #[must_use]
    pub fn dfxml(&self) -> PathBuf {
        self.root.join("dfxml.xml")
    }

    #[must_use]
    pub fn carved_files(&self) -> PathBuf {
        self.root.join("carved_files")
    }

    /// Create the output folder and its fixed subdirectories
    ///
    /// # Errors
    ///
    /// Returns `OutputExists` if the folder is already there and `overwrite`
    /// is false, or `Io` if a directory cannot be created or removed
    pub fn create(&self, overwrite: bool) -> Result<()> {
        if self.root.exists() {
            if !overwrite {
                return Err(FondscanError::OutputExists {
                    path: self.root.clone(),
                });
            }
            fs::remove_dir_all(&self.root).map_err(|e| FondscanError::io(&self.root, e))?;
        }

        for dir in [self.root.clone(), self.csv_reports(), self.logs()] {
            fs::create_dir_all(&dir).map_err(|e| FondscanError::io(&dir, e))?;
        }
        Ok(())
    }
}
