use tracing_appender::non_blocking::WorkerGuard;

use crate::app::config::AppConfig;

/// File name of the log written inside [`AppConfig::log_dir`].
pub const LOG_FILE_NAME: &str = "stepmaze.log";

/// Install a global `fmt` subscriber writing to a log file.
///
/// The terminal belongs to the renderer, so nothing is logged to stdout. Keep the returned guard
/// alive for the whole program, dropping it flushes pending log lines.
pub fn init_tracing(config: &AppConfig) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;
    let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(std::io::Error::other)?;

    Ok(guard)
}
