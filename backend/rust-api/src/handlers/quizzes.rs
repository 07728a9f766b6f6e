use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{LeaderboardResponse, QuizListResponse},
    services::{quiz_service::QuizService, AppState},
};

/// GET /api/quizzes
pub async fn list_quizzes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let service = QuizService::new(state.store.clone());
    let quizzes = service.list_quizzes().await;
    Json(QuizListResponse { quizzes })
}

/// POST /api/quizzes
pub async fn create_quiz(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let service = QuizService::new(state.store.clone());
    let summary = service.create_quiz(&payload).await.map_err(|e| {
        tracing::warn!("Quiz creation rejected: {}", e);
        ApiError::from(e)
    })?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /api/quizzes/{id}
pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let service = QuizService::new(state.store.clone());
    let quiz = service.get_quiz_for_taking(&quiz_id).await?;
    Ok(Json(quiz))
}

/// POST /api/quizzes/{id}/submit
pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
    AppJson(payload): AppJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Submitting answers for quiz: {}", quiz_id);

    let service = QuizService::new(state.store.clone());
    let response = service.submit(&quiz_id, &payload).await.map_err(|e| {
        tracing::warn!("Submission for quiz {} failed: {}", quiz_id, e);
        ApiError::from(e)
    })?;
    Ok(Json(response))
}

/// GET /api/quizzes/{id}/leaderboard
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let service = QuizService::new(state.store.clone());
    let leaderboard = service.leaderboard(&quiz_id).await?;
    Ok(Json(LeaderboardResponse { leaderboard }))
}
