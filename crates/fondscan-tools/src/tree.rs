//! Directory listing with `tree`

use crate::{ToolInvocation, ToolRunner};
use fondscan_core::{FondscanError, Result};
use std::fs;
use std::path::Path;

/// Write a `tree -tDhR` listing of `source` to `out`
///
/// The listing is informational: if `tree` is missing or fails, `out` is
/// still created (possibly empty) and a warning is logged. Returns whether a
/// listing was produced. Does nothing on Windows.
///
/// # Errors
///
/// Returns `Io` only if `out` cannot be written
pub fn render<R: ToolRunner + ?Sized>(
    runner: &R,
    program: &str,
    source: &Path,
    out: &Path,
) -> Result<bool> {
    if cfg!(windows) {
        return Ok(false);
    }

    let invocation = ToolInvocation::new(program).arg("-tDhR").arg(source);
    let (contents, produced) = match runner.run(&invocation) {
        Ok(output) if output.code == 0 => (output.stdout, true),
        Ok(output) => {
            log::warn!(
                "{program} exited with status {}: {}",
                output.code,
                output.stderr.trim()
            );
            (output.stdout, false)
        }
        Err(FondscanError::ToolNotFound { tool }) => {
            log::warn!("{tool} not found; writing an empty {}", out.display());
            (Vec::new(), false)
        }
        Err(e) => {
            log::warn!("{e}; writing an empty {}", out.display());
            (Vec::new(), false)
        }
    };

    fs::write(out, contents).map_err(|e| FondscanError::io(out, e))?;
    Ok(produced)
}
