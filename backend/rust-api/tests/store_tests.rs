//! File-backed store behaviour against a real temporary directory.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use quizroom_api::{
    config::Config,
    models::{QuizResult, TimerMode},
    services::{quiz_service::QuizService, seed, AppState},
    store::{FileStore, QuizStore},
};

fn temp_db_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("quizroom-test-{}", Uuid::new_v4().simple()))
        .join("db.json")
}

fn result(id: &str) -> QuizResult {
    QuizResult {
        id: id.to_string(),
        quiz_id: "quiz_js_basics".to_string(),
        player_name: "Ann".to_string(),
        score: 1,
        total_questions: 3,
        percentage: 33,
        answers: vec![],
        meta: None,
        completed_at: Utc::now(),
    }
}

async fn cleanup(path: &PathBuf) {
    if let Some(dir) = path.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let path = temp_db_path();
    let store = FileStore::new(&path);
    assert_eq!(store.path(), path.as_path());

    let db = store.load().await;

    assert!(db.quizzes.is_empty());
    assert!(db.results.is_empty());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_corrupt_file_reads_as_empty() {
    let path = temp_db_path();
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let db = FileStore::new(&path).load().await;

    assert!(db.quizzes.is_empty());
    cleanup(&path).await;
}

#[tokio::test]
async fn test_mutation_persists_pretty_document() {
    let path = temp_db_path();
    let store = FileStore::new(&path);

    store
        .mutate(Box::new(|db| db.results.insert(0, result("result_a"))))
        .await
        .unwrap();
    store
        .mutate(Box::new(|db| db.results.insert(0, result("result_b"))))
        .await
        .unwrap();

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(raw.contains('\n'));
    let doc: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["quizzes"], serde_json::json!([]));
    assert_eq!(doc["results"][0]["id"], "result_b");
    assert_eq!(doc["results"][1]["id"], "result_a");
    assert!(!path.with_extension("json.tmp").exists());

    cleanup(&path).await;
}

#[tokio::test]
async fn test_legacy_quiz_backfilled_and_rewritten() {
    let path = temp_db_path();
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(
        &path,
        r#"{
            "quizzes": [{
                "id": "quiz_old",
                "title": "Old",
                "description": "",
                "createdAt": "2024-01-01T00:00:00.000Z",
                "questions": [
                    { "id": "q_1", "question": "?", "options": ["a", "b"], "correctIndex": 1 }
                ]
            }]
        }"#,
    )
    .await
    .unwrap();

    let store = FileStore::new(&path);
    seed::ensure_seeded(&store).await.unwrap();

    let db = store.load().await;
    assert_eq!(db.quizzes.len(), 1);
    assert_eq!(db.quizzes[0].category, "General");
    assert!(db.results.is_empty());

    let doc: Value = serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
    assert_eq!(doc["quizzes"][0]["category"], "General");
    assert_eq!(doc["quizzes"][0]["settings"]["shuffleQuestions"], true);
    assert_eq!(doc["results"], serde_json::json!([]));

    cleanup(&path).await;
}

#[tokio::test]
async fn test_loose_legacy_quiz_survives_seeding() {
    let path = temp_db_path();
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(
        &path,
        r#"{
            "quizzes": [
                {
                    "id": "quiz_loose",
                    "title": "Loose",
                    "description": "",
                    "category": null,
                    "settings": {
                        "shuffleQuestions": null,
                        "timer": { "mode": "off", "totalSeconds": "abc" }
                    },
                    "createdAt": "2024-01-01T00:00:00.000Z",
                    "questions": [
                        { "id": "q_1", "question": "?", "options": ["a", "b"], "correctIndex": 0 }
                    ]
                },
                {
                    "id": "quiz_strict",
                    "title": "Strict",
                    "description": "",
                    "category": "Math",
                    "settings": { "shuffleQuestions": false, "timer": { "mode": "total", "totalSeconds": 30 } },
                    "createdAt": "2024-01-02T00:00:00.000Z",
                    "questions": [
                        { "id": "q_2", "question": "1+1?", "options": ["1", "2"], "correctIndex": 1 }
                    ]
                }
            ],
            "results": []
        }"#,
    )
    .await
    .unwrap();

    let store = FileStore::new(&path);
    seed::ensure_seeded(&store).await.unwrap();

    let db = store.load().await;
    let ids: Vec<&str> = db.quizzes.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["quiz_loose", "quiz_strict"]);
    assert!(db.find_quiz("quiz_js_basics").is_none());

    let loose = db.find_quiz("quiz_loose").unwrap();
    assert_eq!(loose.category, "General");
    assert!(loose.settings.shuffle_questions);
    assert_eq!(loose.settings.timer.mode, TimerMode::Off);
    assert_eq!(loose.settings.timer.total_seconds, None);

    let strict = db.find_quiz("quiz_strict").unwrap();
    assert!(!strict.settings.shuffle_questions);
    assert_eq!(strict.settings.timer.countdown_seconds(), Some(30));

    let doc: Value = serde_json::from_str(&tokio::fs::read_to_string(&path).await.unwrap()).unwrap();
    assert_eq!(doc["quizzes"][0]["category"], "General");
    assert_eq!(doc["quizzes"][0]["settings"]["shuffleQuestions"], true);
    assert_eq!(doc["quizzes"].as_array().unwrap().len(), 2);

    cleanup(&path).await;
}

#[tokio::test]
async fn test_app_state_seeds_empty_store() {
    let path = temp_db_path();
    let config = Config {
        data_path: path.clone(),
        ..Config::default()
    };

    let state = AppState::new(config).await.unwrap();
    assert_eq!(state.config.data_path, path);
    let quizzes = QuizService::new(state.store.clone()).list_quizzes().await;

    assert_eq!(quizzes.len(), 2);
    assert_eq!(quizzes[0].title, "JavaScript Basics");
    assert_eq!(quizzes[0].settings.timer.mode, TimerMode::Total);
    assert_eq!(quizzes[1].title, "React Fundamentals");
    assert_eq!(quizzes[1].settings.timer.per_question_seconds, Some(20));
    assert!(path.exists());

    cleanup(&path).await;
}

#[tokio::test]
async fn test_concurrent_mutations_are_not_lost() {
    let path = temp_db_path();
    let store = Arc::new(FileStore::new(&path));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .mutate(Box::new(move |db| {
                        db.results.insert(0, result(&format!("result_{}", i)))
                    }))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.load().await.results.len(), 10);
    cleanup(&path).await;
}
