use anyhow::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with file-based logging
/// Logs are written to ~/.config/onicotech/logs/onico-YYYY-MM-DD-HH-MM-SS.log
///
/// Pending lines are flushed when the returned guard is dropped, so hold it
/// until the command has finished.
pub fn init_logging() -> Result<(PathBuf, WorkerGuard)> {
    let config_dir = dirs::config_dir()
        .ok_or(anyhow::anyhow!("Could not find config directory"))?
        .join("onicotech");

    let (log_path, non_blocking, guard) = log_file(&config_dir.join("logs"))?;

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI codes in log file
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    // Default to INFO, overridable with RUST_LOG
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok((log_path, guard))
}

/// Non-blocking writer for a new timestamped file in `logs_dir`.
fn log_file(logs_dir: &Path) -> Result<(PathBuf, NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(logs_dir)?;

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_filename = format!("onico-{}.log", timestamp);
    let log_path = logs_dir.join(&log_filename);

    let file_appender = tracing_appender::rolling::never(logs_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    Ok((log_path, non_blocking, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_the_guard_flushes_pending_lines() {
        let dir = tempfile::tempdir().unwrap();
        let (log_path, writer, guard) = log_file(&dir.path().join("logs")).unwrap();
        let subscriber = tracing_subscriber::fmt().with_writer(writer).with_ansi(false).finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Logged out");
        });
        drop(guard);

        let contents = std::fs::read_to_string(log_path).unwrap();
        assert!(contents.contains("Logged out"));
    }
}
