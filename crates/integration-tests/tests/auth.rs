//! Integration tests for registration, login, and the token guard.

use reqwest::StatusCode;
use serde_json::{Value, json};

use storekeep_integration_tests::{TEST_PASSWORD, TEST_USERNAME, TestContext};

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let ctx = TestContext::new().await;

    let resp = ctx.register("alice", "s3cret").await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "message": "User created successfully." }));
}

#[tokio::test]
async fn test_register_duplicate_user() {
    let ctx = TestContext::new().await;
    ctx.register("alice", "s3cret").await;

    let resp = ctx.register("alice", "another").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!({ "message": "A user with that username already exists." })
    );
}

#[tokio::test]
async fn test_register_accepts_form_body() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/register"))
        .form(&[("username", "bob"), ("password", "hunter2")])
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_missing_field() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .post(ctx.url("/register"))
        .json(&json!({ "username": "carol" }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_register_blank_username() {
    let ctx = TestContext::new().await;

    let resp = ctx.register("   ", "pw").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_returns_token() {
    let ctx = TestContext::new().await;
    ctx.register(TEST_USERNAME, TEST_PASSWORD).await;

    let resp = ctx.login(TEST_USERNAME, TEST_PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse JSON");
    let token = body["access_token"].as_str().expect("access_token missing");
    assert_eq!(token.split('.').count(), 3, "token should be a compact JWT");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let ctx = TestContext::new().await;
    ctx.register(TEST_USERNAME, TEST_PASSWORD).await;

    let resp = ctx.login(TEST_USERNAME, "wrong").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "message": "Invalid credentials" }));
}

#[tokio::test]
async fn test_login_unknown_user_matches_wrong_password() {
    let ctx = TestContext::new().await;

    let resp = ctx.login("nobody", "whatever").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "message": "Invalid credentials" }));
}

// ============================================================================
// Token guard
// ============================================================================

#[tokio::test]
async fn test_bearer_scheme_accepted() {
    let ctx = TestContext::new().await;
    let store_id = ctx.create_store("test").await;
    ctx.create_item("test", "19.99", store_id).await;

    let header = ctx.auth_header().await;
    let bearer = header.replacen("JWT", "Bearer", 1);

    let resp = ctx
        .client
        .get(ctx.url("/item/test"))
        .header("Authorization", bearer)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let ctx = TestContext::new().await;
    let header = ctx.auth_header().await;
    let tampered = format!("{header}x");

    let resp = ctx
        .client
        .get(ctx.url("/item/test"))
        .header("Authorization", tampered)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body, json!({ "message": "Invalid access token" }));
}

#[tokio::test]
async fn test_token_for_deleted_user_rejected() {
    let ctx = TestContext::new().await;
    let header = ctx.auth_header().await;

    sqlx::query("DELETE FROM users")
        .execute(&ctx.pool)
        .await
        .expect("Failed to delete users");

    let resp = ctx
        .client
        .get(ctx.url("/item/test"))
        .header("Authorization", header)
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
