//! Log subscriber setup.
//!
//! Filter priority: `RUST_LOG` > `[logging] level` > `info`.
//! Output goes to stderr so the chat transcript on stdout stays readable.

use claimclear_core::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LEVEL: &str = "info";

/// Builds the filter directive for the configured level.
///
/// Library crates share the global level; a blank level falls back to `info`.
pub fn filter_directive(level: &str) -> String {
    let level = match level.trim() {
        "" => DEFAULT_LEVEL,
        other => other,
    };
    format!("{level},claimclear_application={level},claimclear_execution={level}")
}

/// Installs the global tracing subscriber.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr)
                        .with_target(false),
                )
                .try_init()
                .ok();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .ok();
        }
    }
}
