//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use fintrack_core::FintrackError;
use std::path::Path;
use tracing::{debug, info, warn};

/// Prefix for environment overrides, e.g. `FINTRACK__CACHE__TTL_SECS=60`.
pub const ENV_PREFIX: &str = "FINTRACK";

/// Selects the environment-specific file, e.g. `config/production.toml`.
pub const ENVIRONMENT_VAR: &str = "FINTRACK_ENVIRONMENT";

/// Configuration loaded once at startup.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Untracked local overrides
    /// 4. Environment variables with `FINTRACK__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, FintrackError> {
        let config = Self::load_config(&config_dir.into())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, FintrackError> {
        Self::new("./config")
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, FintrackError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let builder = Self::file_sources(Config::builder(), config_dir, &environment).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let app_config = Self::build(builder)?;

        if app_config.app.environment != environment {
            warn!(
                "Environment '{}' selected but app.environment is '{}'",
                environment, app_config.app.environment
            );
        }

        Ok(app_config)
    }

    /// Loads files only, skipping environment variables.
    ///
    /// Used by tests and tools that must not observe the process environment.
    pub fn load_files(config_dir: &str, environment: &str) -> Result<AppConfig, FintrackError> {
        Self::build(Self::file_sources(Config::builder(), config_dir, environment))
    }

    fn file_sources(
        mut builder: config::ConfigBuilder<config::builder::DefaultState>,
        config_dir: &str,
        environment: &str,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        for name in ["default", environment, "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }
        builder
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<AppConfig, FintrackError> {
        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_fintrack_error)?;

        ConfigValidator::validate(&app_config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            FintrackError::Configuration(message)
        })?;

        Ok(app_config)
    }
}

fn config_error_to_fintrack_error(err: ConfigError) -> FintrackError {
    FintrackError::Configuration(err.to_string())
}
