//! Launching the tool under test.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Which flag set the tool is launched with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Directory input with virus scan
    Full,
    /// `-n`: directory input, no virus scan
    NoVirusScan,
    /// `-d`: disk image input with virus scan
    DiskImage,
    /// `-nd`: disk image input, no virus scan
    DiskImageNoVirusScan,
}

impl Mode {
    #[must_use]
    pub const fn flag(self) -> Option<&'static str> {
        match self {
            Self::Full => None,
            Self::NoVirusScan => Some("-n"),
            Self::DiskImage => Some("-d"),
            Self::DiskImageNoVirusScan => Some("-nd"),
        }
    }

    #[must_use]
    pub const fn is_disk_image(self) -> bool {
        matches!(self, Self::DiskImage | Self::DiskImageNoVirusScan)
    }

    #[must_use]
    pub const fn scans_for_viruses(self) -> bool {
        matches!(self, Self::Full | Self::DiskImage)
    }
}

/// One command line: `<program> [flag] [extra args] <input> <output root> <basename>`
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    input: PathBuf,
    output_root: PathBuf,
    basename: String,
    mode: Mode,
    extra_args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
}

#[derive(Debug)]
pub struct InvocationOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Invocation {
    #[must_use]
    pub fn new(
        program: impl Into<PathBuf>,
        input: impl Into<PathBuf>,
        output_root: &Path,
        basename: &str,
    ) -> Self {
        Self {
            program: program.into(),
            input: input.into(),
            output_root: output_root.to_path_buf(),
            basename: basename.to_string(),
            mode: Mode::Full,
            extra_args: Vec::new(),
            env: Vec::new(),
        }
    }

    #[must_use]
    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Extra option placed before the positional arguments
    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.extra_args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.env
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.mode.flag().map(OsString::from).into_iter().collect();
        args.extend(self.extra_args.iter().cloned());
        args.push(self.input.clone().into_os_string());
        args.push(self.output_root.clone().into_os_string());
        args.push(OsString::from(&self.basename));
        args
    }

    #[must_use]
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args());
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run to completion. The exit status is recorded, not checked.
    ///
    /// # Errors
    ///
    /// Returns an error only if the program could not be started
    pub fn run(&self) -> io::Result<InvocationOutput> {
        log::info!(
            "invoking {} {:?}",
            self.program.display(),
            self.args()
        );
        let output = self.command().output()?;
        let result = InvocationOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !result.status.success() {
            log::warn!(
                "{} exited with {}: {}",
                self.program.display(),
                result.status,
                result.stderr.trim()
            );
        }
        Ok(result)
    }
}
