//! Disk image handling: DFXML with `fiwalk`, file recovery with `tsk_recover`

use crate::{ToolInvocation, ToolRunner};
use fondscan_core::{FondscanError, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Describe the file system of `image` as Digital Forensics XML
///
/// # Errors
///
/// Returns `ToolNotFound` if fiwalk is not installed or `ToolFailed` on a
/// non-zero exit
pub fn write_dfxml<R: ToolRunner + ?Sized>(
    runner: &R,
    program: &str,
    image: &Path,
    dfxml: &Path,
) -> Result<()> {
    let invocation = ToolInvocation::new(program)
        .arg("-X")
        .arg(dfxml)
        .arg(image);
    let output = runner.run(&invocation)?;
    if output.code != 0 {
        return Err(FondscanError::tool_failed(program, output.code, &output.stderr));
    }
    Ok(())
}

/// Recover files from `image` into `out_dir`
///
/// Without `allocated_only` both allocated and deleted files are recovered.
/// Returns the number of regular files recovered.
///
/// # Errors
///
/// Returns `ToolFailed` on a non-zero exit and `NothingCarved` if the image
/// yielded no files
pub fn carve<R: ToolRunner + ?Sized>(
    runner: &R,
    program: &str,
    image: &Path,
    out_dir: &Path,
    allocated_only: bool,
) -> Result<usize> {
    fs::create_dir_all(out_dir).map_err(|e| FondscanError::io(out_dir, e))?;

    let invocation = ToolInvocation::new(program)
        .arg(if allocated_only { "-a" } else { "-e" })
        .arg(image)
        .arg(out_dir);
    let output = runner.run(&invocation)?;
    if output.code != 0 {
        return Err(FondscanError::tool_failed(program, output.code, &output.stderr));
    }

    let count = count_files(out_dir)?;
    if count == 0 {
        return Err(FondscanError::NothingCarved {
            image: image.to_path_buf(),
        });
    }
    Ok(count)
}

fn count_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            FondscanError::io(path, std::io::Error::from(e))
        })?;
        if entry.file_type().is_file() {
            count += 1;
        }
    }
    Ok(count)
}
