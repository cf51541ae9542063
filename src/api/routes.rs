//! API routes configuration module

use crate::api::handlers::{create_task, get_task};
use crate::core::{ProgressReporter, TaskCoordinator};
use crate::db::Database;
use axum::{
    routing::{get, post},
    Extension, Router,
};

/// Creates and configures the API router with all routes and middleware.
/// Unsupported methods on either route answer 405 through the router
/// itself.
pub fn app(
    database: Database,
    coordinator: TaskCoordinator,
    reporter: ProgressReporter,
) -> Router {
    Router::new()
        .route("/tasks", post(create_task))
        .route("/tasks/:id", get(get_task))
        .layer(Extension(database))
        .layer(Extension(coordinator))
        .layer(Extension(reporter))
}
