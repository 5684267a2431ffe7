//! Integration tests for admin authentication.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p luxe-server)
//! - A bootstrap superadmin (cargo run -p luxe-cli -- superadmin ...)
//!
//! Run with: cargo test -p luxe-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::json;

use luxe_integration_tests::{base_url, client, login, superadmin_token};

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server, database, and bootstrap superadmin"]
async fn test_login_returns_usable_token() {
    let client = client();
    let token = superadmin_token(&client).await;

    // The token must gate a protected endpoint
    let resp = client
        .get(format!("{}/api/superadmin/stats", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get stats");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await.expect("Failed to parse stats");
    assert!(body["organizations"].is_number());
    assert!(body["users"].is_number());
}

#[tokio::test]
#[ignore = "Requires running server, database, and bootstrap superadmin"]
async fn test_login_response_shape() {
    let client = client();
    let body = login(&client, "admin@example.com", "password123").await;

    assert_eq!(body["role"], "SUPERADMIN");
    assert_eq!(body["email"], "admin@example.com");
    assert!(body["id"].is_string());
    assert!(body["token"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_wrong_password_rejected() {
    let client = client();
    let resp = client
        .post(format!("{}/api/admin/auth/login", base_url()))
        .json(&json!({ "email": "admin@example.com", "password": "definitely-wrong" }))
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_missing_fields_rejected() {
    let client = client();
    let resp = client
        .post(format!("{}/api/admin/auth/login", base_url()))
        .json(&json!({ "email": "admin@example.com" }))
        .send()
        .await
        .expect("Failed to send login request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Bearer Header Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_missing_authorization_header_rejected() {
    let client = client();
    let resp = client
        .get(format!("{}/api/products", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_wrong_scheme_rejected() {
    let client = client();
    let resp = client
        .get(format!("{}/api/products", base_url()))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_garbage_bearer_rejected() {
    let client = client();
    let resp = client
        .get(format!("{}/api/products", base_url()))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
