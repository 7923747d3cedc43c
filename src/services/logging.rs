//! Logging initialization.
//!
//! Logs go to stderr so they never mix with the report or `--json` output on
//! stdout. The level comes from `RUST_LOG` when set, otherwise from
//! `[logging] level` in the config file.

use crate::domain::models::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(config: &LoggingConfig, ansi: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .without_time();

    // A second init (e.g. from tests) keeps the first subscriber.
    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
    {
        eprintln!("Warning: logging already initialized: {}", e);
    }
}
