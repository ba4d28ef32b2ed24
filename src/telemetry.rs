//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Environment variable holding per-module filter directives.
///
/// Format: `SKY_GUARD_LOG=sky_guard=debug,sky_guard::adapters=trace`
pub const LOG_ENV_VAR: &str = "SKY_GUARD_LOG";

static INIT: Once = Once::new();

/// Initializes the global subscriber.
///
/// `SKY_GUARD_LOG` wins over the configured filter. Logs go to stderr so
/// stdout stays free for the run summary. Idempotent.
pub fn init(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_new(&config.filter))
            .unwrap_or_else(|_| EnvFilter::new("sky_guard=info"));

        let registry = tracing_subscriber::registry().with(filter);
        match config.format {
            LogFormat::Pretty => registry
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init(),
            LogFormat::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(false)
                        .with_writer(std::io::stderr),
                )
                .init(),
        }
    });
}
