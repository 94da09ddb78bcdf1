use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Installs the process-wide `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the level comes from `DEBUG`.
/// Output goes through a non-blocking stdout writer, so the returned guard
/// must be held until the process exits or buffered lines are lost.
pub fn init_tracing(settings: &LoggingSettings) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.default_directive()));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }

    guard
}
