//! Virus scanning with ClamAV's `clamscan`

use crate::{ToolInvocation, ToolRunner};
use fondscan_core::{FondscanError, Result};
use std::fs;
use std::path::Path;

/// Size limit passed to clamscan when large files must be scanned in full
const LARGE_FILE_LIMIT: &str = "4000M";

/// Counts from the summary block clamscan prints after a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirusScanSummary {
    pub scanned_files: u64,
    pub infected_files: u64,
}

impl VirusScanSummary {
    /// Read the `Scanned files:` and `Infected files:` lines from a clamscan log
    ///
    /// # Errors
    ///
    /// Returns `Parse` if either line is missing or not a number
    pub fn parse(log: &str) -> Result<Self> {
        Ok(Self {
            scanned_files: summary_count(log, "Scanned files:")?,
            infected_files: summary_count(log, "Infected files:")?,
        })
    }

    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.infected_files == 0
    }
}

fn summary_count(log: &str, label: &str) -> Result<u64> {
    let value = log
        .lines()
        .find_map(|line| line.trim().strip_prefix(label))
        .ok_or_else(|| FondscanError::parse(format!("clamscan summary has no '{label}' line")))?;
    value
        .trim()
        .parse()
        .map_err(|_| FondscanError::parse(format!("bad count after '{label}': {}", value.trim())))
}

/// Recursively scan `source`, writing clamscan's report to `log_path`
///
/// Only infected files are listed in the report (`-i`), followed by the
/// summary. Exit status 1 means infections were found and is not an error.
///
/// # Errors
///
/// Returns `ToolNotFound` if clamscan is not installed, `ToolFailed` for exit
/// codes other than 0 and 1, or `Parse` if the summary cannot be read
pub fn scan<R: ToolRunner + ?Sized>(
    runner: &R,
    program: &str,
    source: &Path,
    large_files: bool,
    log_path: &Path,
) -> Result<VirusScanSummary> {
    let mut invocation = ToolInvocation::new(program).args(["-i", "-r"]);
    if large_files {
        invocation = invocation.args([
            format!("--max-filesize={LARGE_FILE_LIMIT}"),
            format!("--max-scansize={LARGE_FILE_LIMIT}"),
        ]);
    }
    let invocation = invocation.arg(source);

    let output = runner.run(&invocation)?;
    fs::write(log_path, &output.stdout).map_err(|e| FondscanError::io(log_path, e))?;

    if output.code > 1 || output.code < 0 {
        return Err(FondscanError::tool_failed(program, output.code, &output.stderr));
    }

    VirusScanSummary::parse(&output.stdout_lossy())
}
