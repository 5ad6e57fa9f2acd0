//! Configuration file
//!
//! Optional TOML file; every key has a default, so an empty file (or no file
//! at all) is a valid configuration.
//!
//! ```toml
//! [tools]
//! sf = "/opt/siegfried/sf"
//! clamscan = "clamscan"
//!
//! [logging]
//! level = "debug"
//! file = "/var/log/fondscan.log"
//! ```

use fondscan_tools::ToolPaths;
use log::LevelFilter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("fondscan: ERR_CONFIG: cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("fondscan: ERR_CONFIG: invalid {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("fondscan: ERR_CONFIG: unknown log level '{0}'")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Also append log lines to this file
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// # Errors
    ///
    /// Returns `LogLevel` for anything but error, warn, info, debug, trace or off
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        match self.level.to_ascii_lowercase().as_str() {
            "off" => Ok(LevelFilter::Off),
            "error" => Ok(LevelFilter::Error),
            "warn" | "warning" => Ok(LevelFilter::Warn),
            "info" => Ok(LevelFilter::Info),
            "debug" => Ok(LevelFilter::Debug),
            "trace" => Ok(LevelFilter::Trace),
            _ => Err(ConfigError::LogLevel(self.level.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolPaths,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and parse the configuration at `path`
    ///
    /// # Errors
    ///
    /// Returns `Read` if the file cannot be read or `Parse` if it is not
    /// valid TOML for this schema
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let txt = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = toml::from_str(&txt).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(cfg)
    }
}
