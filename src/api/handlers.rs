use crate::api::auth;
use crate::api::errors::ApiError;
use crate::core::{ProgressReporter, SubmitTask, TaskCoordinator, TaskSnapshot};
use crate::db::Database;
use axum::http::{HeaderMap, StatusCode};
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::Serialize;

/// Represents the response payload after successfully creating a task
#[derive(Serialize)]
pub struct CreateTaskResponse {
    #[serde(rename = "taskId")]
    pub task_id: String,
}

/// Accepts a generation-task submission.
///
/// The caller only ever sees errors that occur before the task exists:
/// 401 for bad credentials, 400 for bad fields, 404 for missing parents,
/// 500 when the task row itself cannot be written. Once 201 is returned,
/// everything else is visible solely through polling.
#[axum::debug_handler]
pub async fn create_task(
    Extension(database): Extension<Database>,
    Extension(coordinator): Extension<TaskCoordinator>,
    headers: HeaderMap,
    Json(payload): Json<SubmitTask>,
) -> Result<(StatusCode, Json<CreateTaskResponse>), ApiError> {
    let user_id = auth::authenticate(&database, &headers)?;
    let task_id = coordinator.submit(&user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(CreateTaskResponse { task_id })))
}

/// Returns the latest persisted `{status, progress, resultRef?}` of a
/// task. Polling is unauthenticated and always re-reads the store.
#[axum::debug_handler]
pub async fn get_task(
    Path(id): Path<String>,
    Extension(reporter): Extension<ProgressReporter>,
) -> Result<Json<TaskSnapshot>, ApiError> {
    let snapshot = reporter.get(&id)?;
    Ok(Json(snapshot))
}
