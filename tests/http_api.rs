//! Router-level tests for the HTTP surface: status codes per error
//! class and the submit-then-poll flow a client actually performs.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::*;
use docforge::api::routes;
use docforge::core::{ProgressReporter, TaskCoordinator};
use docforge::db::Database;
use docforge::llm::LlmClient;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

fn test_app(database: &Database, provider: ScriptedProvider) -> Router {
    let llm = LlmClient::with_provider(Box::new(provider));
    let coordinator = TaskCoordinator::new(database.clone(), llm);
    let reporter = ProgressReporter::new(database.clone());
    routes::app(database.clone(), coordinator, reporter)
}

fn post_tasks(body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/tasks")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_task(task_id: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/tasks/{}", task_id))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn submission_without_credentials_is_401() {
    let (database, _dir) = temp_database();
    let app = test_app(&database, ScriptedProvider::ok("unused"));

    let body = json!({ "kind": "source_code", "parentRef": "doc-1", "params": { "language": "Python" } });
    let response = app.oneshot(post_tasks(body, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_kind_is_400() {
    let (database, _dir) = temp_database();
    seed_session(&database, "tok-1", "user-1");
    let app = test_app(&database, ScriptedProvider::ok("unused"));

    let body = json!({ "kind": "interpretive_dance", "parentRef": "doc-1", "params": {} });
    let response = app.oneshot(post_tasks(body, Some("tok-1"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_parent_is_404() {
    let (database, _dir) = temp_database();
    seed_session(&database, "tok-1", "user-1");
    let app = test_app(&database, ScriptedProvider::ok("unused"));

    let body = json!({ "kind": "source_code", "parentRef": "missing-doc", "params": { "language": "Python" } });
    let response = app.oneshot(post_tasks(body, Some("tok-1"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn polling_an_unknown_task_is_404() {
    let (database, _dir) = temp_database();
    let app = test_app(&database, ScriptedProvider::ok("unused"));

    let response = app.oneshot(get_task("never-issued")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_methods_are_405() {
    let (database, _dir) = temp_database();
    let app = test_app(&database, ScriptedProvider::ok("unused"));

    let request = Request::builder()
        .method("DELETE")
        .uri("/tasks")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn submit_then_poll_until_completed() {
    let (database, _dir) = temp_database();
    seed_session(&database, "tok-1", "user-1");
    seed_document(&database, "doc-1", "proj-1", "design", "document body");
    let app = test_app(&database, ScriptedProvider::ok("print('hello')"));

    let body = json!({ "kind": "source_code", "parentRef": "doc-1", "params": { "language": "Python" } });
    let response = app
        .clone()
        .oneshot(post_tasks(body, Some("tok-1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let task_id = created["taskId"].as_str().expect("taskId in response").to_string();

    let mut final_snapshot = None;
    for _ in 0..500 {
        let response = app.clone().oneshot(get_task(&task_id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = body_json(response).await;
        if snapshot["status"] != "in_progress" {
            final_snapshot = Some(snapshot);
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let snapshot = final_snapshot.expect("task should reach a terminal status");
    assert_eq!(snapshot["status"], "completed");
    assert_eq!(snapshot["progress"], 100);
    assert!(snapshot["resultRef"].is_string());
}

#[tokio::test]
async fn in_progress_snapshots_omit_the_result_ref() {
    let (database, _dir) = temp_database();
    seed_session(&database, "tok-1", "user-1");
    seed_document(&database, "doc-1", "proj-1", "design", "document body");

    let gate = std::sync::Arc::new(tokio::sync::Notify::new());
    let app = test_app(
        &database,
        ScriptedProvider::gated("code", std::sync::Arc::clone(&gate)),
    );

    let body = json!({ "kind": "source_code", "parentRef": "doc-1", "params": { "language": "Python" } });
    let response = app
        .clone()
        .oneshot(post_tasks(body, Some("tok-1")))
        .await
        .unwrap();
    let task_id = body_json(response).await["taskId"]
        .as_str()
        .expect("taskId in response")
        .to_string();

    let response = app.clone().oneshot(get_task(&task_id)).await.unwrap();
    let snapshot = body_json(response).await;
    assert_eq!(snapshot["status"], "in_progress");
    assert!(snapshot.get("resultRef").is_none());

    gate.notify_one();
}
