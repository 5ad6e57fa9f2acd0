//! Format identification with siegfried (`sf`)

use crate::{ToolInvocation, ToolRunner};
use fondscan_core::{FondscanError, HashAlgorithm, Result};
use std::fs;
use std::path::Path;

/// Identify every file under `source` and write siegfried's CSV to `csv_out`
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns `ToolNotFound` if `sf` is not installed, `ToolFailed` on a
/// non-zero exit, or `Io` if the CSV cannot be written
pub fn identify<R: ToolRunner + ?Sized>(
    runner: &R,
    program: &str,
    source: &Path,
    hash: HashAlgorithm,
    scan_archives: bool,
    csv_out: &Path,
) -> Result<usize> {
    let mut invocation = ToolInvocation::new(program)
        .arg("-csv")
        .args(["-hash", hash.as_str()]);
    if scan_archives {
        invocation = invocation.arg("-z");
    }
    let invocation = invocation.arg(source);

    let output = runner.run(&invocation)?;
    if output.code != 0 {
        return Err(FondscanError::tool_failed(program, output.code, &output.stderr));
    }
    if output.stdout.is_empty() {
        return Err(FondscanError::parse(format!(
            "{program} produced no CSV output for {}",
            source.display()
        )));
    }

    fs::write(csv_out, &output.stdout).map_err(|e| FondscanError::io(csv_out, e))?;
    Ok(output.stdout.len())
}

/// First line of `sf -version`, e.g. `siegfried 1.11.0`
///
/// # Errors
///
/// Returns `ToolNotFound` if `sf` is not installed
pub fn version<R: ToolRunner + ?Sized>(runner: &R, program: &str) -> Result<String> {
    let output = runner.run(&ToolInvocation::new(program).arg("-version"))?;
    Ok(output
        .stdout_lossy()
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("unknown")
        .to_string())
}
