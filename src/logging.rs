//! Process-wide log file setup.
//!
//! Installs a global tracing subscriber that appends timestamped lines to a
//! fixed-name log file in the current working directory. Only the binary
//! entry point installs the subscriber; library code just emits events, so
//! tests exercise the workflow without producing real log files.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

/// Fixed name of the process log file, written in the current working
/// directory. The organizer skips this name when scanning so the tool never
/// moves its own log.
pub const LOG_FILE_NAME: &str = "file_organizer.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug)]
pub enum LoggingError {
    /// Failed to create or open the log file for appending.
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to install the global tracing subscriber.
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenLogFile { path, source } => {
                write!(f, "Failed to open log file {}: {}", path.display(), source)
            }
            Self::SetGlobal(source) => {
                write!(f, "Failed to install global tracing subscriber: {}", source)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

/// Initialize tracing to append to the process log file.
///
/// The file is opened once here and appended to for every operation of the
/// run. Subsequent calls are no-ops. Failures are returned so the caller can
/// degrade to console-only operation instead of aborting startup.
pub fn init() -> Result<(), LoggingError> {
    if LOG_GUARD.get().is_some() {
        return Ok(());
    }

    ensure_file_exists(Path::new(LOG_FILE_NAME))?;

    let file_appender = rolling::never(".", LOG_FILE_NAME);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let timer = fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_owned());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_timer(timer)
        .with_writer(file_writer);

    let subscriber = Registry::default().with(env_filter).with(file_layer);
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;
    let _ = LOG_GUARD.set(guard);

    tracing::info!("Logging initialized; appending to {LOG_FILE_NAME}");
    Ok(())
}

fn ensure_file_exists(path: &Path) -> Result<(), LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|source| LoggingError::OpenLogFile {
            path: path.to_path_buf(),
            source,
        })
}
