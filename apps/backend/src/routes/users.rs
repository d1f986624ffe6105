//! User registration and identity endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::{Identity, RegisterRequest, RegisterResponse};
use crate::AppState;

/// POST /api/users/register
/// Creates a new user and returns the token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Option<RegisterRequest>>,
) -> Result<Json<RegisterResponse>> {
    let name = payload.and_then(|p| p.name);
    let (identity, token) = state.auth.register(name.as_deref()).await?;

    tracing::info!("Registered new user: {}", identity.user_id);

    Ok(Json(RegisterResponse {
        user_id: identity.user_id,
        token,
    }))
}

/// GET /api/users/me
pub async fn me(Extension(identity): Extension<Identity>) -> Json<Identity> {
    Json(identity)
}
