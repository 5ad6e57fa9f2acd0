//! Error type shared across the workspace.
//!
//! Every message carries a stable `ERR_*` code so scripts and tests can match
//! on it without depending on the free-form detail.

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, FondscanError>;

#[derive(thiserror::Error, Debug)]
pub enum FondscanError {
    #[error("fondscan: ERR_IO: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("fondscan: ERR_INVALID_INPUT: {message}")]
    InvalidInput { message: String },

    #[error("fondscan: ERR_OUTPUT_EXISTS: {} already exists (pass --overwrite to replace it)", path.display())]
    OutputExists { path: PathBuf },

    #[error("fondscan: ERR_TOOL_NOT_FOUND: {tool} not found")]
    ToolNotFound { tool: String },

    #[error("fondscan: ERR_TOOL_FAILED: {tool} exited with status {code}: {stderr}")]
    ToolFailed {
        tool: String,
        code: i32,
        stderr: String,
    },

    #[error("fondscan: ERR_PARSE: {message}")]
    Parse { message: String },

    #[error("fondscan: ERR_DATABASE: {message}")]
    Database { message: String },

    #[error("fondscan: ERR_NOTHING_CARVED: no files recovered from {}", image.display())]
    NothingCarved { image: PathBuf },
}

impl FondscanError {
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn tool_failed(tool: impl Into<String>, code: i32, stderr: &str) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            code,
            stderr: stderr.trim().to_string(),
        }
    }

    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Stable code embedded in the message, e.g. `ERR_TOOL_NOT_FOUND`
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "ERR_IO",
            Self::InvalidInput { .. } => "ERR_INVALID_INPUT",
            Self::OutputExists { .. } => "ERR_OUTPUT_EXISTS",
            Self::ToolNotFound { .. } => "ERR_TOOL_NOT_FOUND",
            Self::ToolFailed { .. } => "ERR_TOOL_FAILED",
            Self::Parse { .. } => "ERR_PARSE",
            Self::Database { .. } => "ERR_DATABASE",
            Self::NothingCarved { .. } => "ERR_NOTHING_CARVED",
        }
    }
}
