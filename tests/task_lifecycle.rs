//! Integration tests for the generation-task lifecycle: non-blocking
//! submission, ordered progress checkpoints, fallback on AI failure and
//! the artifact-persistence failure path.

mod common;

use common::*;
use diesel::prelude::*;
use diesel::sql_query;
use docforge::core::{
    ParentRef, ProgressReporter, SubmitTask, TaskCoordinator, TaskKind, TaskParams,
};
use docforge::db::{Database, SourceCode, TaskRepository};
use docforge::errors::Error;
use docforge::llm::LlmClient;
use std::sync::Arc;
use tokio::sync::Notify;

fn engine(database: &Database, provider: ScriptedProvider) -> (TaskCoordinator, ProgressReporter) {
    let llm = LlmClient::with_provider(Box::new(provider));
    (
        TaskCoordinator::new(database.clone(), llm),
        ProgressReporter::new(database.clone()),
    )
}

fn source_code_request(document_id: &str) -> SubmitTask {
    SubmitTask {
        kind: "source_code".to_string(),
        parent_ref: ParentRef::One(document_id.to_string()),
        params: TaskParams {
            language: Some("Python".to_string()),
            ..TaskParams::default()
        },
    }
}

#[tokio::test]
async fn task_row_is_born_in_progress_at_zero() {
    let (database, _dir) = temp_database();

    let mut conn = database.get_conn();
    let task_id = TaskRepository::new(&mut conn)
        .insert_task(TaskKind::SourceCode, "doc-1".to_string())
        .expect("insert should succeed");
    let task = TaskRepository::new(&mut conn)
        .get_task(&task_id)
        .expect("read should succeed")
        .expect("task should exist");

    assert_eq!(task.status, "in_progress");
    assert_eq!(task.progress, 0);
    assert!(task.result_ref.is_none());
}

#[tokio::test]
async fn source_code_task_completes_with_artifact() {
    let (database, _dir) = temp_database();
    seed_document(&database, "doc-1", "proj-1", "design", "a small design document");

    let gate = Arc::new(Notify::new());
    let (coordinator, reporter) = engine(
        &database,
        ScriptedProvider::gated("print('hello')", Arc::clone(&gate)),
    );

    let task_id = coordinator
        .submit("user-1", source_code_request("doc-1"))
        .await
        .expect("submission should be accepted");

    // The AI call is still gated, so the task cannot have finished.
    let snapshot = reporter.get(&task_id).expect("task should be readable");
    assert_eq!(snapshot.status, "in_progress");
    assert!(snapshot.progress == 0 || snapshot.progress == 50);
    assert!(snapshot.result_ref.is_none());

    gate.notify_one();
    let done = wait_for_terminal(&reporter, &task_id).await;
    assert_eq!(done.status, "completed");
    assert_eq!(done.progress, 100);
    let artifact_id = done.result_ref.expect("completed task carries a result ref");

    use docforge::schema::source_codes::dsl::*;
    let mut conn = database.get_conn();
    let artifact = source_codes
        .filter(id.eq(&artifact_id))
        .first::<SourceCode>(&mut conn)
        .expect("artifact row should exist");
    assert_eq!(artifact.file_name, "generated_code.py");
    assert_eq!(artifact.content, "print('hello')");
    assert_eq!(artifact.project_id, "proj-1");
}

#[tokio::test]
async fn polled_progress_is_monotonic_and_ends_at_100() {
    let (database, _dir) = temp_database();
    seed_document(&database, "doc-1", "proj-1", "design", "content");

    let (coordinator, reporter) = engine(&database, ScriptedProvider::ok("code"));
    let task_id = coordinator
        .submit("user-1", source_code_request("doc-1"))
        .await
        .expect("submission should be accepted");

    let mut last = -1;
    loop {
        let snapshot = reporter.get(&task_id).expect("task should be readable");
        assert!(
            snapshot.progress >= last,
            "progress went backwards: {} -> {}",
            last,
            snapshot.progress
        );
        last = snapshot.progress;
        if snapshot.status != "in_progress" {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(last, 100);
}

#[tokio::test]
async fn ai_failure_still_completes_with_fallback_content() {
    let (database, _dir) = temp_database();
    seed_document(&database, "doc-1", "proj-1", "design", "content");

    let (coordinator, reporter) = engine(&database, ScriptedProvider::failing());
    let task_id = coordinator
        .submit("user-1", source_code_request("doc-1"))
        .await
        .expect("submission should be accepted");

    let done = wait_for_terminal(&reporter, &task_id).await;
    assert_eq!(done.status, "completed");
    assert_eq!(done.progress, 100);
    let artifact_id = done.result_ref.expect("fallback completion still has a result ref");

    use docforge::schema::source_codes::dsl::*;
    let mut conn = database.get_conn();
    let artifact = source_codes
        .filter(id.eq(&artifact_id))
        .first::<SourceCode>(&mut conn)
        .expect("artifact row should exist");
    assert!(artifact.content.contains("Sample generated code"));
}

#[tokio::test]
async fn artifact_persistence_failure_marks_the_task_failed() {
    let (database, _dir) = temp_database();
    seed_document(&database, "doc-1", "proj-1", "design", "content");

    // Removing the artifact table makes the background write fail while
    // leaving submission untouched.
    {
        let mut conn = database.get_conn();
        sql_query("DROP TABLE source_codes")
            .execute(&mut conn)
            .expect("drop should succeed");
    }

    let (coordinator, reporter) = engine(&database, ScriptedProvider::ok("code"));
    let task_id = coordinator
        .submit("user-1", source_code_request("doc-1"))
        .await
        .expect("submission should be accepted");

    let done = wait_for_terminal(&reporter, &task_id).await;
    assert_eq!(done.status, "failed");
    assert_eq!(done.progress, 100);
    assert!(done.result_ref.is_none());
}

#[tokio::test]
async fn terminal_status_is_never_left() {
    let (database, _dir) = temp_database();
    seed_document(&database, "doc-1", "proj-1", "design", "content");

    let (coordinator, reporter) = engine(&database, ScriptedProvider::ok("code"));
    let task_id = coordinator
        .submit("user-1", source_code_request("doc-1"))
        .await
        .expect("submission should be accepted");

    let done = wait_for_terminal(&reporter, &task_id).await;
    assert_eq!(done.status, "completed");

    for _ in 0..5 {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let again = reporter.get(&task_id).expect("task should be readable");
        assert_eq!(again.status, "completed");
        assert_eq!(again.progress, 100);
    }
}

#[tokio::test]
async fn duplicate_submissions_get_independent_tasks() {
    let (database, _dir) = temp_database();
    seed_document(&database, "doc-1", "proj-1", "design", "content");

    let (coordinator, reporter) = engine(&database, ScriptedProvider::ok("code"));
    let first = coordinator
        .submit("user-1", source_code_request("doc-1"))
        .await
        .expect("first submission should be accepted");
    let second = coordinator
        .submit("user-1", source_code_request("doc-1"))
        .await
        .expect("second submission should be accepted");

    assert_ne!(first, second);

    let first_done = wait_for_terminal(&reporter, &first).await;
    let second_done = wait_for_terminal(&reporter, &second).await;
    assert_eq!(first_done.status, "completed");
    assert_eq!(second_done.status, "completed");
    assert_ne!(first_done.result_ref, second_done.result_ref);
}

#[tokio::test]
async fn unknown_parent_is_rejected_without_creating_a_task() {
    let (database, _dir) = temp_database();
    let (coordinator, _reporter) = engine(&database, ScriptedProvider::ok("code"));

    let result = coordinator
        .submit("user-1", source_code_request("missing-doc"))
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert_eq!(count_tasks(&database), 0);
}

#[tokio::test]
async fn missing_params_are_rejected_without_creating_a_task() {
    let (database, _dir) = temp_database();
    seed_document(&database, "doc-1", "proj-1", "design", "content");
    let (coordinator, _reporter) = engine(&database, ScriptedProvider::ok("code"));

    let request = SubmitTask {
        kind: "source_code".to_string(),
        parent_ref: ParentRef::One("doc-1".to_string()),
        params: TaskParams::default(),
    };
    let result = coordinator.submit("user-1", request).await;
    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(count_tasks(&database), 0);
}

#[tokio::test]
async fn unknown_task_id_is_not_found() {
    let (database, _dir) = temp_database();
    let reporter = ProgressReporter::new(database.clone());
    let result = reporter.get("never-issued");
    assert!(matches!(result, Err(Error::NotFound(_))));
}
