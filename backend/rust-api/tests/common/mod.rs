#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use quizroom_api::{
    config::Config,
    create_router,
    services::{seed, AppState},
    store::{MemoryStore, QuizStore},
};

pub async fn create_test_app() -> (Router, Arc<MemoryStore>) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let store = Arc::new(MemoryStore::new());
    let app_state = Arc::new(AppState::with_store(
        Config::default(),
        store.clone() as Arc<dyn QuizStore>,
    ));

    (create_router(app_state), store)
}

/// Same as `create_test_app`, with the sample quizzes loaded.
pub async fn create_seeded_app() -> (Router, Arc<MemoryStore>) {
    let (app, store) = create_test_app().await;
    seed::ensure_seeded(store.as_ref())
        .await
        .expect("Failed to seed test store");
    (app, store)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_string(&body).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Three questions, correct answers at 0, 1 and 2, no shuffling.
pub fn sample_quiz_payload() -> Value {
    json!({
        "title": "Capitals",
        "description": "Name the capital city",
        "category": "Geography",
        "settings": {
            "shuffleQuestions": false,
            "timer": { "mode": "total", "totalSeconds": 90 }
        },
        "questions": [
            { "question": "France?", "options": ["Paris", "Lyon", "Nice"], "correctIndex": 0 },
            { "question": "Italy?", "options": ["Milan", "Rome", "Turin"], "correctIndex": 1 },
            { "question": "Spain?", "options": ["Seville", "Valencia", "Madrid"], "correctIndex": 2 }
        ]
    })
}

/// Creates the sample quiz and returns its id with question ids in order.
pub async fn create_sample_quiz(app: &Router) -> (String, Vec<String>) {
    let (status, summary) = post(app, "/api/quizzes", sample_quiz_payload()).await;
    assert_eq!(status, StatusCode::CREATED);
    let quiz_id = summary["id"].as_str().unwrap().to_string();

    let (_, quiz) = get(app, &format!("/api/quizzes/{}", quiz_id)).await;
    let question_ids = quiz["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect();

    (quiz_id, question_ids)
}

/// Submits `selections` against `question_ids` in order.
pub async fn submit_answers(
    app: &Router,
    quiz_id: &str,
    player_name: &str,
    question_ids: &[String],
    selections: &[i64],
) -> (StatusCode, Value) {
    let answers: Vec<Value> = question_ids
        .iter()
        .zip(selections)
        .map(|(id, selected)| json!({ "questionId": id, "selectedIndex": selected }))
        .collect();

    post(
        app,
        &format!("/api/quizzes/{}/submit", quiz_id),
        json!({ "playerName": player_name, "answers": answers }),
    )
    .await
}
