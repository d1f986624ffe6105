//! Spaced repetition review endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/review/due
pub async fn due(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<DueReviewQuery>,
) -> Result<Json<DueReviewResponse>> {
    let records = state
        .store
        .due_reviews(&identity.user_id, Utc::now(), query.limit())
        .await?;

    let mut items = Vec::with_capacity(records.len());
    for record in records {
        // Questions deleted since the attempt are skipped
        if let Some(question) = state.store.get_question(record.question_id).await? {
            items.push(DueReviewItem { question, record });
        }
    }

    Ok(Json(DueReviewResponse { items }))
}
