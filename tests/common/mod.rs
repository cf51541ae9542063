#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use docforge::core::{ProgressReporter, TaskSnapshot};
use docforge::db::{Database, Document, Project, Session, SourceCode, Template, UploadedFile};
use docforge::errors::Error;
use docforge::llm::{ChatMessage, LlmProvider};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Notify;

/// Creates an isolated database in a temp directory with all tables
/// bootstrapped. The TempDir must stay alive for the test's duration.
pub fn temp_database() -> (Database, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("docforge-test.db");
    let database = Database::new(path.to_str().expect("temp path is not utf-8"));
    database
        .initialize_schema()
        .expect("schema bootstrap should succeed");
    (database, dir)
}

pub fn seed_project(database: &Database, id: &str, name: &str) {
    let now = Utc::now().to_rfc3339();
    let row = Project {
        id: id.to_string(),
        name: name.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    let mut conn = database.get_conn();
    diesel::insert_into(docforge::schema::projects::table)
        .values(&row)
        .execute(&mut conn)
        .expect("failed to seed project");
}

pub fn seed_document(database: &Database, id: &str, project_id: &str, doc_type: &str, content: &str) {
    let now = Utc::now().to_rfc3339();
    let row = Document {
        id: id.to_string(),
        project_id: project_id.to_string(),
        doc_type: doc_type.to_string(),
        content: content.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    let mut conn = database.get_conn();
    diesel::insert_into(docforge::schema::documents::table)
        .values(&row)
        .execute(&mut conn)
        .expect("failed to seed document");
}

pub fn seed_source_code(database: &Database, id: &str, project_id: &str, file_name: &str, content: &str) {
    let now = Utc::now().to_rfc3339();
    let row = SourceCode {
        id: id.to_string(),
        project_id: project_id.to_string(),
        file_name: file_name.to_string(),
        content: content.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    let mut conn = database.get_conn();
    diesel::insert_into(docforge::schema::source_codes::table)
        .values(&row)
        .execute(&mut conn)
        .expect("failed to seed source code");
}

pub fn seed_file(database: &Database, id: &str, project_id: &str, file_name: &str, content: &str) {
    let now = Utc::now().to_rfc3339();
    let row = UploadedFile {
        id: id.to_string(),
        project_id: project_id.to_string(),
        file_name: file_name.to_string(),
        content: content.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    let mut conn = database.get_conn();
    diesel::insert_into(docforge::schema::uploaded_files::table)
        .values(&row)
        .execute(&mut conn)
        .expect("failed to seed uploaded file");
}

pub fn seed_template(database: &Database, id: &str, name: &str, content: &str) {
    let now = Utc::now().to_rfc3339();
    let row = Template {
        id: id.to_string(),
        name: name.to_string(),
        content: content.to_string(),
        created_at: now.clone(),
        updated_at: now,
    };
    let mut conn = database.get_conn();
    diesel::insert_into(docforge::schema::templates::table)
        .values(&row)
        .execute(&mut conn)
        .expect("failed to seed template");
}

pub fn seed_session(database: &Database, token: &str, user_id: &str) {
    let row = Session {
        token: token.to_string(),
        user_id: user_id.to_string(),
        created_at: Utc::now().to_rfc3339(),
    };
    let mut conn = database.get_conn();
    diesel::insert_into(docforge::schema::sessions::table)
        .values(&row)
        .execute(&mut conn)
        .expect("failed to seed session");
}

/// A provider with one scripted reply, optionally gated on a Notify so a
/// test can observe the task mid-flight before releasing the call.
#[derive(Debug)]
pub struct ScriptedProvider {
    reply: Result<String, String>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedProvider {
    pub fn ok(text: &str) -> Self {
        ScriptedProvider {
            reply: Ok(text.to_string()),
            gate: None,
        }
    }

    pub fn failing() -> Self {
        ScriptedProvider {
            reply: Err("upstream unavailable".to_string()),
            gate: None,
        }
    }

    pub fn gated(text: &str, gate: Arc<Notify>) -> Self {
        ScriptedProvider {
            reply: Ok(text.to_string()),
            gate: Some(gate),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn call_llm_api(&self, _messages: Vec<ChatMessage>) -> Result<String, Error> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.reply.clone().map_err(Error::Upstream)
    }
}

/// Polls the reporter until the task reaches a terminal status.
pub async fn wait_for_terminal(reporter: &ProgressReporter, task_id: &str) -> TaskSnapshot {
    for _ in 0..500 {
        let snapshot = reporter.get(task_id).expect("task should be readable");
        if snapshot.status == "completed" || snapshot.status == "failed" {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("task {} never reached a terminal status", task_id);
}

pub fn count_tasks(database: &Database) -> i64 {
    use docforge::schema::generation_tasks::dsl::*;
    let mut conn = database.get_conn();
    generation_tasks
        .count()
        .get_result(&mut conn)
        .expect("failed to count tasks")
}
