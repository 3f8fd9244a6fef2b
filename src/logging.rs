use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Set up file-based logging under the platform data directory. The
/// terminal itself belongs to ratatui, so nothing may write to stdout or
/// stderr while the app runs.
///
/// Returns the appender guard; dropping it flushes buffered log lines, so
/// the caller holds it for the process lifetime. Returns `None` (and stays
/// silent) when no usable data directory exists.
pub fn init() -> Option<WorkerGuard> {
    let log_dir = dirs::data_dir()?.join("adcopy");
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, "adcopy.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
