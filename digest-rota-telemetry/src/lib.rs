use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Used when `RUST_LOG` is unset or does not parse.
pub const DEFAULT_LOG_LEVEL: &str = "info,digest_rota_optimizer=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into())
}

/// Installs the global subscriber: a human readable fmt layer on stderr.
///
/// # Panics
///
/// Panics if a global subscriber was already installed.
pub fn setup_telemetry() {
    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(log_layer.with_filter(env_filter()))
        .init();

    tracing::debug!(default = DEFAULT_LOG_LEVEL, "telemetry ready");
}
