//! Integration tests for the chat endpoints.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use interview_flow::adapters::{app_router, AppState, InMemorySessionStore};
use interview_flow::domain::interview::QuestionCatalog;

fn app(with_ui: bool) -> Router {
    let state = AppState::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(QuestionCatalog::builtin()),
    )
    .with_chat_ui(with_ui);
    app_router(state)
}

async fn post(app: &Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn say(app: &Router, session_id: &str, message: &str) -> Value {
    let (status, body) = post(
        app,
        "/chat",
        Some(json!({ "session_id": session_id, "message": message })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn chat_start_greets_and_asks_first_question() {
    let app = app(true);
    let (status, body) = post(&app, "/chat/start", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("スキップ"));
    assert_eq!(body["options"].as_array().unwrap().len(), 4);
    assert_eq!(body["progress"]["current"], 0);
    assert_eq!(body["completed"], false);
}

#[tokio::test]
async fn chat_runs_to_completion() {
    let app = app(true);
    let (_, start) = post(&app, "/chat/start", None).await;
    let session_id = start["session_id"].as_str().unwrap().to_string();

    let body = say(&app, &session_id, "会社員").await;
    assert_eq!(body["progress"]["current"], 1);
    assert_eq!(body["accepted"], true);
    let body = say(&app, &session_id, "技術スキル向上").await;
    assert!(body["options"].as_array().unwrap().is_empty());
    say(&app, &session_id, "プロジェクト管理").await;
    say(&app, &session_id, "skip").await;
    let body = say(&app, &session_id, "ネットワーキング").await;

    assert_eq!(body["completed"], true);
    assert_eq!(body["progress"]["current"], 4);
    assert!(body["options"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn chat_invalid_answer_reprompts_with_200() {
    let app = app(true);
    let (_, start) = post(&app, "/chat/start", None).await;
    let session_id = start["session_id"].as_str().unwrap().to_string();

    let body = say(&app, &session_id, "わかりません").await;

    assert_eq!(body["accepted"], false);
    assert_eq!(body["completed"], false);
    assert_eq!(body["progress"]["current"], 0);
    assert_eq!(body["options"], start["options"]);
    assert!(body["message"].as_str().unwrap().contains("あなたの現在の職業"));
}

#[tokio::test]
async fn chat_skip_returns_to_question_at_the_end() {
    let app = app(true);
    let (_, start) = post(&app, "/chat/start", None).await;
    let session_id = start["session_id"].as_str().unwrap().to_string();

    let body = say(&app, &session_id, "スキップ").await;
    assert!(body["message"].as_str().unwrap().contains("キャリア"));
    say(&app, &session_id, "起業・独立").await;
    say(&app, &session_id, "営業").await;
    say(&app, &session_id, "1000万円以上").await;
    let body = say(&app, &session_id, "メンタリング").await;

    assert_eq!(body["completed"], false);
    assert!(body["message"].as_str().unwrap().contains("あなたの現在の職業"));

    let body = say(&app, &session_id, "学生").await;
    assert_eq!(body["completed"], true);
}

#[tokio::test]
async fn chat_rejects_oversized_message() {
    let app = app(true);
    let (_, start) = post(&app, "/chat/start", None).await;
    let session_id = start["session_id"].as_str().unwrap().to_string();
    let padded_skip = format!("skip{}", " ".repeat(100_000));

    let (status, body) = post(
        &app,
        "/chat",
        Some(json!({ "session_id": session_id, "message": padded_skip })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let body = say(&app, &session_id, "会社員").await;
    assert_eq!(body["progress"]["current"], 1);
}

#[tokio::test]
async fn chat_unknown_session_is_not_found() {
    let app = app(true);
    let (status, body) = post(
        &app,
        "/chat",
        Some(json!({ "session_id": "missing", "message": "会社員" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn chat_restart_starts_over() {
    let app = app(true);
    let (_, start) = post(&app, "/chat/start", None).await;
    let session_id = start["session_id"].as_str().unwrap().to_string();
    say(&app, &session_id, "会社員").await;

    let (status, body) = post(
        &app,
        "/chat/restart",
        Some(json!({ "session_id": session_id })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["session_id"], start["session_id"]);
    assert_eq!(body["progress"]["current"], 0);
}

#[tokio::test]
async fn chat_page_is_served_only_when_enabled() {
    let request = || Request::builder().uri("/chat/ui").body(Body::empty()).unwrap();

    let response = app(true).oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8(bytes.to_vec()).unwrap().contains("<html"));

    let response = app(false).oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
