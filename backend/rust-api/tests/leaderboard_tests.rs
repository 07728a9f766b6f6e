mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_leaderboard_keeps_best_attempt_per_player() {
    let (app, _) = common::create_test_app().await;
    let (quiz_id, ids) = common::create_sample_quiz(&app).await;

    common::submit_answers(&app, &quiz_id, "Ann", &ids, &[0, 0, 0]).await;
    common::submit_answers(&app, &quiz_id, "Ann", &ids, &[0, 1, 2]).await;
    common::submit_answers(&app, &quiz_id, "Ann", &ids, &[0, 1, 0]).await;
    common::submit_answers(&app, &quiz_id, "Bo", &ids, &[0, 1, 0]).await;

    let (status, body) = common::get(&app, &format!("/api/quizzes/{}/leaderboard", quiz_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["leaderboard"],
        json!([
            { "playerName": "Ann", "score": 3, "percentage": 100 },
            { "playerName": "Bo", "score": 2, "percentage": 67 }
        ])
    );
}

#[tokio::test]
async fn test_higher_score_beats_recency() {
    let (app, _) = common::create_test_app().await;
    let (quiz_id, ids) = common::create_sample_quiz(&app).await;

    common::submit_answers(&app, &quiz_id, "Early", &ids, &[0, 1, 2]).await;
    common::submit_answers(&app, &quiz_id, "Late", &ids, &[0, 0, 0]).await;

    let (_, body) = common::get(&app, &format!("/api/quizzes/{}/leaderboard", quiz_id)).await;

    assert_eq!(body["leaderboard"][0]["playerName"], "Early");
    assert_eq!(body["leaderboard"][1]["playerName"], "Late");
}

#[tokio::test]
async fn test_leaderboard_truncated_to_twenty() {
    let (app, _) = common::create_test_app().await;
    let (quiz_id, ids) = common::create_sample_quiz(&app).await;

    for i in 0..25 {
        let selections: &[i64] = if i % 2 == 0 { &[0, 1, 2] } else { &[0, 0, 0] };
        let (status, _) =
            common::submit_answers(&app, &quiz_id, &format!("Player {}", i), &ids, selections)
                .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = common::get(&app, &format!("/api/quizzes/{}/leaderboard", quiz_id)).await;

    let rows = body["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 20);
    // 13 perfect scores lead the board
    assert!(rows[..13].iter().all(|row| row["score"] == 3));
    assert!(rows[13..].iter().all(|row| row["score"] == 1));
}

#[tokio::test]
async fn test_leaderboard_only_counts_its_quiz() {
    let (app, _) = common::create_seeded_app().await;
    let (quiz_id, ids) = common::create_sample_quiz(&app).await;
    common::submit_answers(&app, &quiz_id, "Ann", &ids, &[0, 1, 2]).await;

    let (status, body) = common::get(&app, "/api/quizzes/quiz_js_basics/leaderboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["leaderboard"], json!([]));
}

#[tokio::test]
async fn test_leaderboard_unknown_quiz() {
    let (app, _) = common::create_test_app().await;

    let (status, body) = common::get(&app, "/api/quizzes/quiz_missing/leaderboard").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Quiz not found");
}
