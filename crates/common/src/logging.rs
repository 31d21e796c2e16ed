//! Logging and tracing initialization.
//!
//! Log output goes to stderr so that command output on stdout stays
//! machine-readable JSON.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Target prefix shared by the binary and every `cutline_*` library crate.
const CUTLINE_TARGET: &str = "cutline";

/// Filter directives for a configured level.
///
/// A bare level such as `"debug"` applies to Cutline's crates only, with
/// everything else held at `warn`. A level that already carries directives
/// (`"cutline_edit_core=trace,info"`) is used unchanged.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("warn,{CUTLINE_TARGET}={level}")
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level` when set. Only the first
/// call installs a subscriber.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.with_target(true).compact().finish())
    };
    if installed.is_ok() {
        tracing::debug!(json = config.json, level = %config.level, "Logging initialized");
    }
}
