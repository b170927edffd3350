use std::sync::Once;

use time::macros::format_description;
use tracing::metadata::LevelFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[cfg(test)]
#[path = "tracing_utils_test.rs"]
mod tracing_utils_test;

pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

static TRACING_INITIALIZED: Once = Once::new();

/// Installs the global subscriber. Subsequent calls are no-ops.
///
/// `RUST_LOG` directives take precedence over `default_level`.
pub fn configure_tracing(default_level: LevelFilter) {
    TRACING_INITIALIZED.call_once(|| {
        // Use default time formatting with subsecond precision limited to three digits.
        let time_format = format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        );
        let timer = UtcTime::new(time_format);

        let fmt_layer = fmt::layer()
            .compact()
            .with_timer(timer)
            .with_target(false) // No module name.
            // Instead, file name and line number.
            .with_file(true)
            .with_line_number(true);

        // This sets a single subscriber to all of the threads.
        tracing_subscriber::registry().with(fmt_layer).with(get_filter_layer(default_level)).init();
        tracing::debug!("Tracing has been successfully initialized.");
    });
}

pub(crate) fn get_filter_layer(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

/// Parses a log level name such as `info` or `DEBUG`.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.parse::<LevelFilter>().ok()
}
