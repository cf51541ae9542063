//! Main entry point for the application.
//!
//! This module initializes logging, loads environment variables and
//! configuration, and runs the HTTP server hosting the generation-task
//! engine.

use clap::Parser;
use docforge::{api, cli, config, utils};
use tracing::{error, info, warn};

/// Main entry point that initializes and runs the application.
///
/// # Initialization steps:
/// 1. Parse CLI arguments
/// 2. Initialize logging system
/// 3. Load environment variables
/// 4. Load configuration and apply CLI overrides
/// 5. Run the API server
#[tokio::main]
async fn main() {
    let cli = cli::Cli::try_parse().expect("Failed to parse CLI arguments");
    utils::init_logging(&cli.logging_level, cli.log_to_file);

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    let mut config = match cli.config {
        Some(path) => config::load_config(&path).expect("Failed to parse configuration"),
        None => config::AppConfig::default(),
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(path) = cli.database_path {
        config.database.path = path;
    }

    info!("Starting API server on port {}", config.server.port);
    if let Err(e) = api::server::launch_server(&config).await {
        error!("Failed to start server: {}", e);
    }
}
