//! External tool invocation
//!
//! Format identification, virus scanning and disk image carving are all done
//! by third-party binaries. This crate knows how to call each of them and how
//! to read what they print; the process boundary itself sits behind
//! [`ToolRunner`] so the pipeline can be driven by a scripted runner in tests.

use fondscan_core::{FondscanError, Result};
use serde::Deserialize;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::ErrorKind;
use std::process::{Command, Stdio};

pub mod clamav;
pub mod scripted;
pub mod siegfried;
pub mod sleuthkit;
pub mod tree;

/// A single external command line
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl ToolInvocation {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, `-1` when the process was killed by a signal
    pub code: i32,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl ToolOutput {
    #[must_use]
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[must_use]
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

pub trait ToolRunner {
    /// Run the command to completion and collect its output
    ///
    /// # Errors
    ///
    /// Returns `ToolNotFound` if the program cannot be located, or `Io` if it
    /// could not be started. A non-zero exit is *not* an error here; callers
    /// decide which exit codes they accept.
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput>;
}

/// Runs tools as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        log::debug!("running: {invocation}");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FondscanError::ToolNotFound {
                    tool: invocation.program.clone(),
                },
                _ => FondscanError::io(&invocation.program, e),
            })?;

        let code = output.status.code().unwrap_or(-1);
        log::debug!("{} exited with status {code}", invocation.program);

        Ok(ToolOutput {
            code,
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Program names or paths for every tool the pipeline calls
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub sf: String,
    pub clamscan: String,
    pub tree: String,
    pub fiwalk: String,
    pub tsk_recover: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            sf: "sf".to_string(),
            clamscan: "clamscan".to_string(),
            tree: "tree".to_string(),
            fiwalk: "fiwalk".to_string(),
            tsk_recover: "tsk_recover".to_string(),
        }
    }
}
