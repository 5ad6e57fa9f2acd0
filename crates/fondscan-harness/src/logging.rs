//! Test-run log: everything at DEBUG to `fondscan-test.log` in the system
//! temp directory, WARN and above to stderr.

use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;
use once_cell::sync::OnceCell;
use std::path::PathBuf;

static LOG_PATH: OnceCell<Option<PathBuf>> = OnceCell::new();

/// Install the test logger once per process; later calls are no-ops.
///
/// Returns the log file path, or `None` if another logger was already
/// installed or the file could not be opened.
pub fn init_test_log() -> Option<PathBuf> {
    LOG_PATH
        .get_or_init(|| {
            let path = std::env::temp_dir().join("fondscan-test.log");
            let file = fern::log_file(&path).ok()?;

            let format = |out: fern::FormatCallback<'_>, msg: &std::fmt::Arguments<'_>, record: &log::Record<'_>| {
                out.finish(format_args!(
                    "[{}][{:5}][{}] {}",
                    Local::now().to_rfc3339(),
                    record.level(),
                    record.target(),
                    msg
                ));
            };

            Dispatch::new()
                .level(LevelFilter::Debug)
                .chain(Dispatch::new().format(format).chain(file))
                .chain(
                    Dispatch::new()
                        .level(LevelFilter::Warn)
                        .format(format)
                        .chain(std::io::stderr()),
                )
                .apply()
                .ok()?;
            Some(path)
        })
        .clone()
}
