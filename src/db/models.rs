use crate::schema::{
    documents, generation_tasks, progress_reports, projects, proposals, quality_checks, sessions,
    source_codes, templates, uploaded_files, work_estimates,
};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable};
use serde::{Deserialize, Serialize};

/// Represents one asynchronous generation task
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = generation_tasks)]
pub struct GenerationTask {
    /// Unique identifier, generated at creation, immutable
    pub id: String,
    /// Kind of work this task performs (see `core::TaskKind`)
    pub kind: String,
    /// Identifier of the entity the task operates on; a single id or a
    /// JSON array of ids for the multi-document kinds
    pub parent_ref: String,
    /// Current status, stored as its wire string
    pub status: String,
    /// 0-100, monotonically non-decreasing
    pub progress: i32,
    /// Identifier of the produced artifact; set iff status is "completed"
    pub result_ref: Option<String>,
    /// Timestamp when the task was created
    pub created_at: String,
    /// Timestamp of the latest status/progress transition
    pub updated_at: String,
}

/// A generated document
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = documents)]
pub struct Document {
    pub id: String,
    pub project_id: String,
    /// Requested document type (e.g. "requirements", "design")
    pub doc_type: String,
    /// JSON payload with title and sections
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A generated source file
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = source_codes)]
pub struct SourceCode {
    pub id: String,
    pub project_id: String,
    pub file_name: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of a consistency or quality check
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = quality_checks)]
pub struct QualityCheck {
    pub id: String,
    pub project_id: String,
    /// "consistency" or "quality"
    pub check_type: String,
    /// JSON payload with scores and issue lists
    pub result: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A work estimate produced for a project
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = work_estimates)]
pub struct WorkEstimate {
    pub id: String,
    pub project_id: String,
    /// JSON payload with total hours and per-phase breakdown
    pub estimate: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A generated proposal document
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = proposals)]
pub struct Proposal {
    pub id: String,
    pub project_id: String,
    /// The user who requested the proposal
    pub user_id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A generated progress report
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = progress_reports)]
pub struct ProgressReport {
    pub id: String,
    pub project_id: String,
    /// JSON payload with overall progress, phases and issue summary
    pub report: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A project, read-only from this service's point of view
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = projects)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A file uploaded by a user, the raw input for document generation
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = uploaded_files)]
pub struct UploadedFile {
    pub id: String,
    pub project_id: String,
    pub file_name: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A proposal template with a `{{key_info}}` slot
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = templates)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

/// An issued session token, owned by the identity collaborator
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Insertable)]
#[diesel(table_name = sessions)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: String,
}
