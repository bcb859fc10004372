use tracing_subscriber::EnvFilter;

use crate::config::{defaults, ObservabilityConfig};

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "VANTAGE_LOG";

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects `VANTAGE_LOG` for filtering, defaulting to `info`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init();
}

/// Initialize tracing from a resolved [`ObservabilityConfig`].
///
/// `VantageConfig::load` has already folded `VANTAGE_LOG` into `log_level`,
/// so the config is the only input here.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    let filter = filter_from_config(config);
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let _ = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// The filter for `config.log_level`; an unparseable directive falls back to `info`.
pub fn filter_from_config(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(defaults::DEFAULT_LOG_LEVEL))
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init();
}
