//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, Result};
use crate::models::Identity;
use crate::AppState;

/// Auth middleware - resolves the bearer token to an identity
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    // Skip auth for register endpoint and health check
    let path = request.uri().path();
    if path == "/api/users/register" || path == "/health" {
        return Ok(next.run(request).await);
    }

    // Extract Bearer token
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?
        .to_string();

    let identity = state
        .auth
        .authenticate(&token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    // Store identity in request extensions
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Admin gate - must run inside `auth_middleware`
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Result<Response> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    if !identity.is_admin {
        tracing::warn!("Rejected admin request from user {}", identity.user_id);
        return Err(ApiError::Forbidden("Administrator access required".to_string()));
    }

    Ok(next.run(request).await)
}
