//! Accuracy statistics endpoint

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// GET /api/stats
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<StatsBreakdown>> {
    let records = state.store.list_answers(&identity.user_id).await?;
    Ok(Json(StatsBreakdown::from_records(&records)))
}
