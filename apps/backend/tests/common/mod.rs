//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to an in-memory store
//! - Helper functions for creating test data
//! - Authentication helpers

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use quiz_backend::db::{AuthProvider, DocumentStore, MemoryStore};
use quiz_backend::models::Question;
use quiz_backend::{app, AppState};

/// Token of the administrator every context starts with.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Test context containing the store and router.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    app: Router,
}

impl TestContext {
    /// Create a new test context with a fresh in-memory store and an admin user.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        store
            .ensure_admin(ADMIN_TOKEN, "admin")
            .await
            .expect("Failed to create admin user");

        let state = AppState::new(store.clone(), store.clone());
        let app = app(state);

        Self { store, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Build a test server around the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Create a regular user and return its ID and token.
    pub async fn create_test_user(&self, name: Option<&str>) -> (String, String) {
        let (identity, token) = self
            .store
            .register(name)
            .await
            .expect("Failed to create test user");
        (identity.user_id, token)
    }

    /// Store a question directly, bypassing the admin API.
    pub async fn insert_question(&self, question: &Question) {
        self.store
            .insert_question(question)
            .await
            .expect("Failed to insert question");
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }
}
