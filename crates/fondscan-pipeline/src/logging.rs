//! Global logger setup.
//!
//! Lines look like `[2024-05-01T10:00:00+02:00][INFO ][fondscan_pipeline] msg`
//! and go to stderr, and to the configured log file when there is one. Stdout
//! is left alone.

use crate::config::{ConfigError, LoggingConfig};
use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

#[derive(thiserror::Error, Debug)]
pub enum LoggingError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("fondscan: ERR_LOGGING: {0}")]
    Init(#[from] fern::InitError),
}

/// Install the global logger. `verbose` raises the level to at least `debug`.
///
/// # Errors
///
/// Returns an error if the level is invalid, the log file cannot be opened,
/// or a logger is already installed
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<(), LoggingError> {
    let mut level = config.level_filter()?;
    if verbose && level < LevelFilter::Debug {
        level = LevelFilter::Debug;
    }

    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                msg
            ));
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(path) = &config.file {
        dispatch = dispatch.chain(fern::log_file(path).map_err(fern::InitError::from)?);
    }

    dispatch.apply().map_err(fern::InitError::from)?;
    Ok(())
}
