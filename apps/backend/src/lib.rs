pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use quiz_core::{FixedInterval, ReviewScheduler};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, StoreBackend};
use crate::db::{AuthProvider, DocumentStore, MemoryStore, PostgresStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub scheduler: Arc<dyn ReviewScheduler>,
}

impl AppState {
    /// State with the default 7-day / 1-day review schedule
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            store,
            auth,
            scheduler: Arc::new(FixedInterval::default()),
        }
    }
}

/// Build the API router
pub fn app(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/admin/questions",
            post(routes::admin::create).get(routes::questions::list),
        )
        .route("/api/admin/questions/parse", post(routes::admin::parse_preview))
        .route("/api/admin/questions/:id", delete(routes::admin::delete))
        .layer(middleware::from_fn(routes::auth::admin_middleware));

    // Build router with protected routes
    let protected_routes = Router::new()
        // User routes
        .route("/api/users/me", get(routes::users::me))
        // Question routes
        .route("/api/questions", get(routes::questions::list))
        .route("/api/questions/:id", get(routes::questions::get))
        .route("/api/questions/:id/answers", post(routes::questions::submit))
        .route(
            "/api/questions/:id/answers/latest",
            get(routes::questions::latest_answer),
        )
        // Review routes
        .route("/api/review/due", get(routes::review::due))
        // Stats routes
        .route("/api/stats", get(routes::stats::get))
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users/register", post(routes::users::register))
        .merge(protected_routes)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let state = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config.database_url.as_deref().unwrap_or_default();

            tracing::info!("Connecting to database...");
            let db = PostgresStore::connect(database_url, config.database_max_connections).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;

            let db = Arc::new(db);
            AppState::new(db.clone(), db)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            AppState::new(store.clone(), store)
        }
    };

    if let Some(token) = &config.admin_token {
        let admin = state.auth.ensure_admin(token, "admin").await?;
        tracing::info!("Admin user ready: {}", admin.user_id);
    }

    let app = app(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn memory_state() -> AppState {
        let store = Arc::new(MemoryStore::new());
        AppState::new(store.clone(), store)
    }

    #[tokio::test]
    async fn health_check_is_public() {
        let response = app(memory_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_route_needs_token() {
        let response = app(memory_state())
            .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
