use crate::db::{Database, TaskRepository};
use crate::errors::Error;
use serde::Serialize;

/// The view a polling client gets of a task
#[derive(Debug, Clone, Serialize)]
pub struct TaskSnapshot {
    pub status: String,
    pub progress: i32,
    #[serde(rename = "resultRef", skip_serializing_if = "Option::is_none")]
    pub result_ref: Option<String>,
}

/// Read-only lookup of a task's current state. Every call re-reads the
/// store, so a poller always sees the latest persisted snapshot.
#[derive(Clone)]
pub struct ProgressReporter {
    database: Database,
}

impl ProgressReporter {
    /// Creates a reporter over the shared store
    pub fn new(database: Database) -> Self {
        ProgressReporter { database }
    }

    /// Returns the current `{status, progress, resultRef?}` of a task
    ///
    /// # Errors
    /// Fails with `Error::NotFound` for unknown task ids
    pub fn get(&self, task_id: &str) -> Result<TaskSnapshot, Error> {
        let mut conn = self.database.get_conn();
        let task = TaskRepository::new(&mut conn)
            .get_task(task_id)?
            .ok_or_else(|| Error::NotFound(format!("task '{}' not found", task_id)))?;

        Ok(TaskSnapshot {
            status: task.status,
            progress: task.progress,
            result_ref: task.result_ref,
        })
    }
}
