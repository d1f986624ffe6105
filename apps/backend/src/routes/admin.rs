//! Admin endpoints for question ingestion and management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn parse_text(text: &str) -> Result<ParsedQuestion> {
    quiz_core::parse(text).map_err(|e| {
        tracing::warn!("Rejected pasted question: {}", e);
        ApiError::from(e)
    })
}

/// POST /api/admin/questions/parse
/// Parses pasted text without storing it
pub async fn parse_preview(Json(payload): Json<ParseTextRequest>) -> Result<Json<ParsedQuestion>> {
    Ok(Json(parse_text(&payload.text)?))
}

/// POST /api/admin/questions
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<ParseTextRequest>,
) -> Result<(StatusCode, Json<Question>)> {
    let parsed = parse_text(&payload.text)?;
    let question = Question::from_parsed(parsed, Uuid::new_v4(), Utc::now());

    state.store.insert_question(&question).await?;

    tracing::info!(
        "Admin {} added question {}",
        identity.user_id,
        question.id
    );

    Ok((StatusCode::CREATED, Json(question)))
}

/// DELETE /api/admin/questions/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(question_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.store.delete_question(question_id).await?;

    if deleted {
        tracing::info!("Admin {} deleted question {}", identity.user_id, question_id);
    }

    Ok(Json(DeleteResponse { deleted }))
}
