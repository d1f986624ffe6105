//! Question browsing and answer submission endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;
use quiz_core::evaluator::evaluate_submission;

/// GET /api/questions
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<QuestionListQuery>,
) -> Result<Json<QuestionListResponse>> {
    let questions = state
        .store
        .list_questions(query.kind()?, query.limit())
        .await?;
    Ok(Json(QuestionListResponse { questions }))
}

/// GET /api/questions/:id
pub async fn get(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<Json<Question>> {
    let question = state
        .store
        .get_question(question_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Question not found".to_string()))?;
    Ok(Json(question))
}

/// POST /api/questions/:id/answers
/// Every submission creates a new record
pub async fn submit(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<(StatusCode, Json<AnswerRecord>)> {
    let question = state
        .store
        .get_question(question_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Question not found".to_string()))?;

    let record = evaluate_submission(
        &question,
        &payload.submission,
        &identity.user_id,
        Utc::now(),
        state.scheduler.as_ref(),
    )?;

    state.store.insert_answer(&record).await?;

    tracing::debug!(
        "User {} answered {} ({}), next review {}",
        identity.user_id,
        question_id,
        if record.is_correct { "correct" } else { "incorrect" },
        record.next_review_date
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/questions/:id/answers/latest
pub async fn latest_answer(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(question_id): Path<Uuid>,
) -> Result<Json<AnswerRecord>> {
    let record = state
        .store
        .latest_answer(&identity.user_id, question_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No answer recorded".to_string()))?;
    Ok(Json(record))
}
