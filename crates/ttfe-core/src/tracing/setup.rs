//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the TTFE tracing/logging system.
///
/// Reads the `TTFE_LOG` environment variable for per-module log levels.
/// Format: `TTFE_LOG=ttfe_mining::search=trace,ttfe_mining=info`
///
/// Falls back to the filter implied by `debug_level` if `TTFE_LOG` is not
/// set or is invalid. The debug level only changes what is logged.
///
/// Idempotent; only the first call installs a subscriber.
pub fn init_tracing(debug_level: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(filter_for_debug_level(debug_level)));

        // A subscriber installed by the host (tests, embedding app) wins.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init();
    });
}

/// Map the configured debug level to a filter directive.
///
/// 0 disables console output, 1 reports stage progress, 2 adds stage
/// details, 3 traces every search node.
pub fn filter_for_debug_level(debug_level: u8) -> &'static str {
    match debug_level {
        0 => "off",
        1 => "ttfe_core=info,ttfe_mining=info,ttfe_cli=info",
        2 => "ttfe_core=debug,ttfe_mining=debug,ttfe_cli=debug",
        _ => "ttfe_core=trace,ttfe_mining=trace,ttfe_cli=trace",
    }
}
