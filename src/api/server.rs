use crate::api::routes;
use crate::config::AppConfig;
use crate::core::{ProgressReporter, TaskCoordinator};
use crate::db::Database;
use crate::llm::LlmClient;
use std::net::SocketAddr;
use tracing::info;

/// Starts and runs the HTTP server using Axum web framework
///
/// Builds the shared database pool (creating tables if missing), the LLM
/// client and the task engine, then serves until the process stops.
///
/// # Errors
/// Fails if the schema cannot be initialized, the provider is
/// misconfigured, or the listener cannot bind.
pub async fn launch_server(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::new(&config.database.path);
    database.initialize_schema()?;

    let llm = LlmClient::new(&config.llm.provider, &config.llm.model)?;
    let coordinator = TaskCoordinator::new(database.clone(), llm);
    let reporter = ProgressReporter::new(database.clone());

    let app = routes::app(database, coordinator, reporter);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
