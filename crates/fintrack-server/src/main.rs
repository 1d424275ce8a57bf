//! # Fintrack Server
//!
//! Main entry point: loads configuration, installs logging, and runs the
//! REST server until shutdown.

use fintrack_config::ConfigLoader;
use fintrack_server::app::AppBuilder;
use fintrack_server::logging::init_logging;
use fintrack_server::startup::print_banner;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    print_banner();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.app.environment,
        "Starting Fintrack server..."
    );

    match AppBuilder::new().with_config(config).run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, code = e.error_code(), "Application error");
            ExitCode::FAILURE
        }
    }
}
