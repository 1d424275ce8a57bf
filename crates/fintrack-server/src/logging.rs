//! Tracing subscriber setup.

use fintrack_config::ObservabilityConfig;
use fintrack_core::FintrackError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
#[must_use]
pub fn default_directives(level: &str) -> String {
    format!("{},sqlx=warn,tower_http={}", level.to_lowercase(), level.to_lowercase())
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Output is JSON
/// lines or human-readable text depending on `log_format`.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), FintrackError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.is_json() {
        registry
            .with(fmt::layer().json().with_target(true).with_current_span(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| FintrackError::Startup(format!("Failed to initialize logging: {e}")))
}
