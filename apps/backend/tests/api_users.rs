//! User API tests.

mod common;

use axum::http::StatusCode;

use common::fixtures;
use common::{TestContext, ADMIN_TOKEN};

/// Test registering a user returns a usable token.
#[tokio::test]
async fn test_register_user() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server
        .post("/api/users/register")
        .json(&fixtures::register_request(Some("小華")))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let token = body["token"].as_str().unwrap().to_string();

    let response = server
        .get("/api/users/me")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let me: serde_json::Value = response.json();
    assert_eq!(me["user_id"], body["user_id"]);
    assert_eq!(me["name"], "小華");
    assert_eq!(me["is_admin"], false);
}

/// Test admin identity carries the admin flag.
#[tokio::test]
async fn test_admin_identity() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server
        .get("/api/users/me")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(ADMIN_TOKEN),
        )
        .await;

    response.assert_status_ok();
    let me: serde_json::Value = response.json();
    assert_eq!(me["is_admin"], true);
}

/// Test missing and invalid tokens are rejected.
#[tokio::test]
async fn test_requires_valid_token() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server.get("/api/users/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/users/me")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value("not-a-token"),
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "unauthorized");
}

/// Test health check needs no token.
#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}
