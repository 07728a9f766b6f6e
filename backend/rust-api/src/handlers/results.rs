use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use super::ApiError;
use crate::services::{quiz_service::QuizService, AppState};

/// GET /api/results/{result_id} - shareable view of one attempt
pub async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(result_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let service = QuizService::new(state.store.clone());
    let detail = service.get_result(&result_id).await?;
    Ok(Json(detail))
}
