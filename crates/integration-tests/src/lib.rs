//! Integration tests for Luxe.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, run migrations, bootstrap a superadmin
//! cargo run -p luxe-cli -- migrate
//! cargo run -p luxe-cli -- superadmin -e admin@example.com -p password123
//!
//! # Start the server
//! cargo run -p luxe-server
//!
//! # Run the (ignored-by-default) integration tests
//! cargo test -p luxe-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `LUXE_BASE_URL` - server base URL (default `http://localhost:3000`)
//! - `SUPERADMIN_EMAIL` / `SUPERADMIN_PASSWORD` - bootstrap credentials
//!   (defaults match the `luxe-cli superadmin` example above)

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("LUXE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Plain HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in with email and password; returns the login response body
/// (including the `token` field).
///
/// # Panics
///
/// Panics if the request fails or the login is rejected.
pub async fn login(client: &Client, email: &str, password: &str) -> Value {
    let resp = client
        .post(format!("{}/api/admin/auth/login", base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(
        resp.status().is_success(),
        "login failed with status {}",
        resp.status()
    );

    resp.json().await.expect("Failed to parse login response")
}

/// Log in as the bootstrap superadmin and return the bearer token.
///
/// # Panics
///
/// Panics if the login fails.
pub async fn superadmin_token(client: &Client) -> String {
    let email =
        std::env::var("SUPERADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password =
        std::env::var("SUPERADMIN_PASSWORD").unwrap_or_else(|_| "password123".to_string());

    let body = login(client, &email, &password).await;
    body["token"]
        .as_str()
        .expect("login response missing token")
        .to_string()
}
