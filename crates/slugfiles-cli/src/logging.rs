use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Log to stderr, and additionally to `LOG_FILE_PATH` when it is set. No file
/// is created otherwise, so a run never adds entries to the tree it works on.
///
/// The returned guard flushes the file writer and must outlive the run.
pub fn init_logger() -> Option<WorkerGuard> {
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| "info".to_string());

    let (file_layer, guard) = match log_file_target(env::var("LOG_FILE_PATH").ok()) {
        Some((dir, file_name)) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(file_layer)
        .with(EnvFilter::new(filter))
        .init();

    debug!(file_logging = guard.is_some(), "logger ready");

    guard
}

/// Directory and file name for the log file, or `None` when file logging is off.
fn log_file_target(configured: Option<String>) -> Option<(PathBuf, PathBuf)> {
    let configured = configured.filter(|value| !value.trim().is_empty())?;
    let path = Path::new(&configured);
    let file_name = PathBuf::from(path.file_name()?);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, file_name))
}
