//! File-based logging bootstrap.
//!
//! The TUI owns the terminal while it runs, so diagnostics go to a small set
//! of rotated files inside the application data directory instead of stderr.
//! Persistence failures are logged here and nowhere else; the screen never
//! shows them.

use std::path::Path;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

const LOG_FILE_BASENAME: &str = "ticklist";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Start the rotating file logger. The returned handle must stay alive for
/// the duration of the program; dropping it stops the background flusher.
///
/// Callers treat failure as non-fatal: the app runs fine unlogged, it just
/// loses its diagnostics.
pub fn init_logging(log_dir: &Path) -> Result<LoggerHandle, flexi_logger::FlexiLoggerError> {
    let handle = Logger::try_with_env_or_str("info")?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    info!(
        "ticklist {} starting, logs in {}",
        env!("CARGO_PKG_VERSION"),
        log_dir.display()
    );

    Ok(handle)
}
