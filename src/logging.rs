use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber. An explicit `level` wins over `RUST_LOG`;
/// without either, `info` is used. Output goes to stderr so stdout stays
/// machine-readable.
pub fn init(level: Option<&str>) -> Result<(), String> {
    let env_filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|error| format!("invalid log level `{level}`: {error}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|error| error.to_string())
}
