//! Tracing subscriber setup for the galaxy runner.
//!
//! Console output is human readable with uptime stamps. Debug builds can also
//! write a JSON log next to the config so a headless run can be inspected
//! after the fact.

use std::path::Path;

use galaxy_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default directive when neither `RUST_LOG` nor the config says otherwise.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "galaxy.log";

/// Filter directive derived from the config's `debug.log_level`.
///
/// An empty or missing level falls back to [`DEFAULT_DIRECTIVE`].
#[must_use]
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the config. In debug builds with a `log_dir`, a JSON
/// file layer is added; failure to create the file only drops that layer.
/// Returns `false` when a subscriber was already installed (e.g. by another
/// test), in which case nothing changes.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) -> bool {
    let directive = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        return subscriber.with(file_layer).try_init().is_ok();
    }

    subscriber.try_init().is_ok()
}

/// `EnvFilter` built from [`DEFAULT_DIRECTIVE`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_DIRECTIVE)
}
