//! Server startup utilities.

use fintrack_config::ServerConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    _______       __                  __
   / ____(_)___  / /__________ ______/ /__
  / /_  / / __ \/ __/ ___/ __ `/ ___/ //_/
 / __/ / / / / / /_/ /  / /_/ / /__/ ,<
/_/   /_/_/ /_/\__/_/   \__,_/\___/_/|_|
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(server: &ServerConfig) {
    let separator = "=".repeat(60);
    let base = format!("http://{}", server.addr());
    info!("{}", separator);
    info!("REST API:  {}/api/v1", base);
    info!("Health:    {}/health", base);
    info!("Ready:     {}/ready", base);
    info!("Timeout:   {}s per request", server.request_timeout_secs);
    info!("{}", separator);
}
