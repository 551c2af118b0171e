//! Logging bootstrap for bookshelf binaries.
//!
//! `RUST_LOG` takes precedence over the configured level. The output format is
//! chosen by `telemetry.log_format` (`pretty` for humans, `json` for collectors).

use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the level filter from `RUST_LOG`, falling back to `settings.log_level`.
pub fn env_filter(settings: &TelemetrySettings) -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(from_env.as_deref(), &settings.log_level)
}

/// Invalid directives fall through to the next source, ending at `info`.
fn filter_from(env_directives: Option<&str>, log_level: &str) -> EnvFilter {
    env_directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(log_level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Install the global tracing subscriber.
///
/// Returns `false` when a subscriber was already installed; the existing one is kept.
pub fn init(settings: &TelemetrySettings) -> bool {
    let registry = tracing_subscriber::registry().with(env_filter(settings));

    let installed = match settings.log_format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true))
            .try_init()
            .is_ok(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::info!(
            target: "bookshelf-telemetry",
            format = ?settings.log_format,
            level = %settings.log_level,
            "telemetry initialized"
        );
    }

    installed
}
