use crate::core::{
    gather_input, generate_artifact, validate_params, GenerationInput, ParentRef, TaskKind,
    TaskParams,
};
use crate::db::{ArtifactRepository, Database, TaskRepository};
use crate::errors::Error;
use crate::llm::LlmClient;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

/// A parsed submission: what to generate, for which entity, with which
/// kind-specific parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTask {
    pub kind: String,
    #[serde(rename = "parentRef")]
    pub parent_ref: ParentRef,
    #[serde(default)]
    pub params: TaskParams,
}

/// Orchestrates one generation task end to end: validate, create the
/// task row, hand the work to a background unit, and finalize the row as
/// completed or failed. The submitting caller never waits on generation.
#[derive(Clone)]
pub struct TaskCoordinator {
    database: Database,
    llm: Arc<LlmClient>,
}

impl TaskCoordinator {
    /// Creates a coordinator over the shared store and LLM client
    pub fn new(database: Database, llm: LlmClient) -> Self {
        TaskCoordinator {
            database,
            llm: Arc::new(llm),
        }
    }

    /// Accepts a submission and returns the new task id.
    ///
    /// Everything that can be rejected is rejected here, synchronously:
    /// unknown kinds and missing parameters (`Error::Validation`), absent
    /// parents (`Error::NotFound`) and the task-row insert itself
    /// (`Error::DieselError`). Once the id is returned, all later
    /// failures are visible only through the task's status.
    pub async fn submit(&self, user_id: &str, request: SubmitTask) -> Result<String, Error> {
        let kind = TaskKind::from_str(&request.kind)
            .map_err(|_| Error::Validation(format!("unknown task kind '{}'", request.kind)))?;
        validate_params(kind, &request.parent_ref, &request.params)?;

        let mut conn = self.database.get_conn();
        let input = gather_input(&mut conn, kind, &request.parent_ref, &request.params, user_id)?;
        let task_id =
            TaskRepository::new(&mut conn).insert_task(kind, request.parent_ref.to_storage())?;
        drop(conn);

        info!("task {} ({}) accepted", task_id, kind);
        self.spawn_generation(task_id.clone(), input);

        Ok(task_id)
    }

    /// Launches the background unit for one task. The join handle is
    /// dropped on purpose: the persisted row is the only cross-process
    /// handle to the work.
    fn spawn_generation(&self, task_id: String, input: GenerationInput) {
        let database = self.database.clone();
        let llm = Arc::clone(&self.llm);
        tokio::spawn(async move {
            run_generation(database, llm, task_id, input).await;
        });
    }
}

/// Drives one task through its checkpoints: 50 right before the AI call,
/// then the artifact write, then the terminal update at 100. No error
/// escapes this unit; failures end up in the task row or in the log.
async fn run_generation(
    database: Database,
    llm: Arc<LlmClient>,
    task_id: String,
    input: GenerationInput,
) {
    {
        let mut conn = database.get_conn();
        if let Err(e) = TaskRepository::new(&mut conn).update_progress(&task_id, 50) {
            error!("task {}: failed to persist progress 50: {}", task_id, e);
        }
    }

    // AI failures are absorbed inside generate_artifact via per-kind
    // fallback content; this await only ever yields an artifact payload.
    let artifact = generate_artifact(&llm, input).await;

    let mut conn = database.get_conn();
    match ArtifactRepository::new(&mut conn).insert(artifact) {
        Ok(artifact_id) => {
            match TaskRepository::new(&mut conn).mark_completed(&task_id, &artifact_id) {
                Ok(()) => info!("task {} completed with artifact {}", task_id, artifact_id),
                Err(e) => error!("task {}: failed to persist completion: {}", task_id, e),
            }
        }
        Err(e) => {
            error!("task {}: artifact persistence failed: {}", task_id, e);
            if let Err(e) = TaskRepository::new(&mut conn).mark_failed(&task_id) {
                error!("task {}: failed to persist failure: {}", task_id, e);
            }
        }
    }
}
