use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_DIR_ENV: &str = "PAGEBUNDLE_LOG_DIR";

/// `$PAGEBUNDLE_LOG_DIR`, else `$HOME/.pagebundle/logs`.
fn log_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = lookup(LOG_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
        return PathBuf::from(dir);
    }
    let home = lookup("HOME").unwrap_or_else(|| ".".to_string());
    Path::new(&home).join(".pagebundle/logs")
}

/// Install the global subscriber for one component (`serve`, `cli`).
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    let log_dir = log_dir(|key| std::env::var(key).ok());
    let _ = std::fs::create_dir_all(&log_dir);

    // Files roll daily and are prefixed with the component, e.g. serve.log.2026-10-19
    let file_appender = tracing_appender::rolling::daily(&log_dir, format!("{component}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    guard
}
