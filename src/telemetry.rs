//! Tracing setup for the CLI binary

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Initialize tracing-subscriber; returns the file-writer guard, which
/// must be held for the life of the process
///
/// Console output goes to stderr, filtered by `RUST_LOG` (default
/// `info`). When `log_file` is set, everything at debug and above is
/// also appended there through a non-blocking writer.
pub fn init_tracing_subscriber(log_file: Option<&std::path::Path>) -> Option<WorkerGuard> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("pathscout.log"));
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
