use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Keeps the file writer flushing until dropped. Hold it for the lifetime of
/// the process.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize console logging, plus a daily-rotated log file when
/// `KIIT_LOG_DIR` is set.
///
/// # Configuration
///
/// - **Log Level**: `RUST_LOG` if set, otherwise `LOG_LEVEL` (default: "info")
///   applied to the `kiit_finder*` crates
/// - **Filtering**: HTTP client internals kept at warn
/// - **Format**: compact, with file and line numbers, written to stderr so
///   command output on stdout stays clean
/// - **File**: `$KIIT_LOG_DIR/kiit-finder.log.<date>`, no ANSI colors
///
/// Calling this twice is harmless; the second subscriber is not installed.
pub fn init_logging() -> LoggingGuard {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "kiit_finder={lvl},kiit_finder_auth={lvl},kiit_finder_cli={lvl},reqwest=warn,hyper=warn,hyper_util=warn",
                lvl = log_level
            ))
        })
    };

    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(env_filter());

    let (file_layer, file_guard) = match std::env::var("KIIT_LOG_DIR") {
        Ok(dir) if !dir.is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "kiit-finder.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_filter(env_filter());
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    if tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}
