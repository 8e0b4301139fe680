use std::path::Path;

use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Installs the global subscriber for an application embedding the estimators:
/// stdout plus a daily rolling file under `log_dir`.
///
/// The returned guard flushes the file writer on drop, keep it alive in `main`.
pub fn init_tracing(log_dir: impl AsRef<Path>) -> tracing_appender::non_blocking::WorkerGuard {
    // 按天滚动的日志文件
    let file_appender = rolling::daily(log_dir.as_ref(), "log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stdout);

    // no ANSI escapes in the file
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env()) // RUST_LOG=info,average=trace
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}

/// Subscriber for test binaries. Output goes through the libtest capture, and
/// calling it from several tests is fine: only the first call installs anything.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_init_tracing_writes_log_file() {
        let dir = tempfile::tempdir().unwrap();
        {
            let _guard = init_tracing(dir.path());
            tracing::info!("hello from the test");
        }
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(!files.is_empty());

        // a second installation attempt must not panic
        init_test_tracing();
    }
}
