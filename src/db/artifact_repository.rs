use crate::db::models::{
    Document, ProgressReport, Proposal, QualityCheck, SourceCode, WorkEstimate,
};
use crate::errors::Error;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde_json::Value;
use uuid::Uuid;

/// Payload for an artifact about to be persisted, one variant per kind.
#[derive(Debug, Clone)]
pub enum NewArtifact {
    Document {
        project_id: String,
        doc_type: String,
        content: Value,
    },
    SourceCode {
        project_id: String,
        file_name: String,
        content: String,
    },
    QualityCheck {
        project_id: String,
        check_type: String,
        result: Value,
    },
    WorkEstimate {
        project_id: String,
        estimate: Value,
    },
    Proposal {
        project_id: String,
        user_id: String,
        content: String,
    },
    ProgressReport {
        project_id: String,
        report: Value,
    },
}

/// Writes finished artifacts. Each task calls `insert` at most once; a
/// failed write is not retried and deterministically fails the task.
pub struct ArtifactRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> ArtifactRepository<'a> {
    /// Creates a new ArtifactRepository instance
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        ArtifactRepository { conn }
    }

    /// Persists exactly one new artifact row in the table matching the
    /// payload's kind.
    ///
    /// # Returns
    /// The generated artifact id
    ///
    /// # Errors
    /// Returns an Error if database operations fail
    pub fn insert(&mut self, artifact: NewArtifact) -> Result<String, Error> {
        let artifact_id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        match artifact {
            NewArtifact::Document {
                project_id,
                doc_type,
                content,
            } => {
                let row = Document {
                    id: artifact_id.clone(),
                    project_id,
                    doc_type,
                    content: serde_json::to_string(&content)?,
                    created_at: now.clone(),
                    updated_at: now,
                };
                diesel::insert_into(crate::schema::documents::table)
                    .values(&row)
                    .execute(self.conn)?;
            }
            NewArtifact::SourceCode {
                project_id,
                file_name,
                content,
            } => {
                let row = SourceCode {
                    id: artifact_id.clone(),
                    project_id,
                    file_name,
                    content,
                    created_at: now.clone(),
                    updated_at: now,
                };
                diesel::insert_into(crate::schema::source_codes::table)
                    .values(&row)
                    .execute(self.conn)?;
            }
            NewArtifact::QualityCheck {
                project_id,
                check_type,
                result,
            } => {
                let row = QualityCheck {
                    id: artifact_id.clone(),
                    project_id,
                    check_type,
                    result: serde_json::to_string(&result)?,
                    created_at: now.clone(),
                    updated_at: now,
                };
                diesel::insert_into(crate::schema::quality_checks::table)
                    .values(&row)
                    .execute(self.conn)?;
            }
            NewArtifact::WorkEstimate {
                project_id,
                estimate,
            } => {
                let row = WorkEstimate {
                    id: artifact_id.clone(),
                    project_id,
                    estimate: serde_json::to_string(&estimate)?,
                    created_at: now.clone(),
                    updated_at: now,
                };
                diesel::insert_into(crate::schema::work_estimates::table)
                    .values(&row)
                    .execute(self.conn)?;
            }
            NewArtifact::Proposal {
                project_id,
                user_id,
                content,
            } => {
                let row = Proposal {
                    id: artifact_id.clone(),
                    project_id,
                    user_id,
                    content,
                    created_at: now.clone(),
                    updated_at: now,
                };
                diesel::insert_into(crate::schema::proposals::table)
                    .values(&row)
                    .execute(self.conn)?;
            }
            NewArtifact::ProgressReport { project_id, report } => {
                let row = ProgressReport {
                    id: artifact_id.clone(),
                    project_id,
                    report: serde_json::to_string(&report)?,
                    created_at: now.clone(),
                    updated_at: now,
                };
                diesel::insert_into(crate::schema::progress_reports::table)
                    .values(&row)
                    .execute(self.conn)?;
            }
        }

        Ok(artifact_id)
    }
}
