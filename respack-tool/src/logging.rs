use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log level used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a stderr subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`]. Calling it again is a no-op.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
