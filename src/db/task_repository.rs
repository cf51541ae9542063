use crate::core::{TaskKind, TaskStatus};
use crate::db::models::GenerationTask;
use crate::errors::Error;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

/// Repository for generation-task records. Pure data access; the lifecycle
/// policy lives in the coordinator.
pub struct TaskRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> TaskRepository<'a> {
    /// Creates a new TaskRepository instance
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        TaskRepository { conn }
    }

    /// Inserts a new task row, born `in_progress` at progress 0.
    ///
    /// Every submission gets its own row; there is no deduplication of
    /// tasks sharing a parent.
    ///
    /// # Returns
    /// The generated task id
    ///
    /// # Errors
    /// Returns an Error if database operations fail
    pub fn insert_task(&mut self, kind: TaskKind, parent_ref: String) -> Result<String, Error> {
        use crate::schema::generation_tasks;

        let task_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let new_task = GenerationTask {
            id: task_id.clone(),
            kind: kind.as_str().to_string(),
            parent_ref,
            status: TaskStatus::InProgress.as_str().to_string(),
            progress: 0,
            result_ref: None,
            created_at: now.clone(),
            updated_at: now,
        };

        diesel::insert_into(generation_tasks::table)
            .values(&new_task)
            .execute(self.conn)?;

        Ok(task_id)
    }

    /// Retrieves a single task by id
    ///
    /// # Errors
    /// Returns an Error if database operations fail
    pub fn get_task(&mut self, task_id: &str) -> Result<Option<GenerationTask>, Error> {
        use crate::schema::generation_tasks::dsl::*;
        let found = generation_tasks
            .filter(id.eq(task_id))
            .first::<GenerationTask>(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Updates the progress of a task and touches `updated_at`
    ///
    /// # Errors
    /// Returns an Error if database operations fail
    pub fn update_progress(&mut self, task_id: &str, new_progress: i32) -> Result<(), Error> {
        use crate::schema::generation_tasks::dsl::*;
        let now = Utc::now().to_rfc3339();

        diesel::update(generation_tasks.filter(id.eq(task_id)))
            .set((progress.eq(new_progress), updated_at.eq(&now)))
            .execute(self.conn)?;
        Ok(())
    }

    /// Finalizes a task as completed: status, progress 100 and the result
    /// reference land in one UPDATE so a poller never sees a partial
    /// terminal state.
    ///
    /// # Errors
    /// Returns an Error if database operations fail
    pub fn mark_completed(&mut self, task_id: &str, artifact_id: &str) -> Result<(), Error> {
        use crate::schema::generation_tasks::dsl::*;
        let now = Utc::now().to_rfc3339();

        diesel::update(generation_tasks.filter(id.eq(task_id)))
            .set((
                status.eq(TaskStatus::Completed.as_str()),
                progress.eq(100),
                result_ref.eq(artifact_id),
                updated_at.eq(&now),
            ))
            .execute(self.conn)?;
        Ok(())
    }

    /// Finalizes a task as failed at progress 100, leaving `result_ref`
    /// unset.
    ///
    /// # Errors
    /// Returns an Error if database operations fail
    pub fn mark_failed(&mut self, task_id: &str) -> Result<(), Error> {
        use crate::schema::generation_tasks::dsl::*;
        let now = Utc::now().to_rfc3339();

        diesel::update(generation_tasks.filter(id.eq(task_id)))
            .set((
                status.eq(TaskStatus::Failed.as_str()),
                progress.eq(100),
                updated_at.eq(&now),
            ))
            .execute(self.conn)?;
        Ok(())
    }
}
