//! Integration tests for category behavior.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p luxe-server)
//! - A bootstrap superadmin (cargo run -p luxe-cli -- superadmin ...)
//!
//! Run with: cargo test -p luxe-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use luxe_integration_tests::{base_url, client, superadmin_token};

#[tokio::test]
#[ignore = "Requires running server, database, and bootstrap superadmin"]
async fn test_category_delete_leaves_products_uncategorized() {
    let client = client();
    let token = superadmin_token(&client).await;
    let base = base_url();
    let nonce = Uuid::new_v4().simple().to_string();

    // Category with one product in it
    let category: Value = client
        .post(format!("{base}/api/categories"))
        .bearer_auth(&token)
        .json(&json!({ "name": format!("Doomed Category {nonce}") }))
        .send()
        .await
        .expect("Failed to create category")
        .json()
        .await
        .expect("Failed to parse category");
    let category_id = category["id"].as_str().expect("category id");

    let product: Value = client
        .post(format!("{base}/api/products"))
        .bearer_auth(&token)
        .json(&json!({
            "title": format!("Orphan-to-be {nonce}"),
            "price": "5.00",
            "categoryId": category_id,
        }))
        .send()
        .await
        .expect("Failed to create product")
        .json()
        .await
        .expect("Failed to parse product");
    let product_id = product["id"].as_str().expect("product id");
    assert_eq!(product["categoryId"].as_str(), Some(category_id));

    // Delete the category
    let resp = client
        .delete(format!("{base}/api/categories/{category_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete category");
    assert_eq!(resp.status(), StatusCode::OK);

    // The product survives, uncategorized
    let product: Value = client
        .get(format!("{base}/api/products/{product_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to fetch product")
        .json()
        .await
        .expect("Failed to parse product");
    assert!(product["categoryId"].is_null());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_category_tree_is_public() {
    let client = client();

    // No Authorization header at all
    let resp = client
        .get(format!("{}/api/categories/tree", base_url()))
        .send()
        .await
        .expect("Failed to fetch tree");

    assert_eq!(resp.status(), StatusCode::OK);
    let tree: Value = resp.json().await.expect("Failed to parse tree");
    assert!(tree.is_array());
}

#[tokio::test]
#[ignore = "Requires running server, database, and bootstrap superadmin"]
async fn test_duplicate_slug_rejected() {
    let client = client();
    let token = superadmin_token(&client).await;
    let base = base_url();
    let nonce = Uuid::new_v4().simple().to_string();
    let name = format!("Twice Created {nonce}");

    let resp = client
        .post(format!("{base}/api/organizations"))
        .bearer_auth(&token)
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create organization");
    assert!(resp.status().is_success());

    // Same name, same derived slug
    let resp = client
        .post(format!("{base}/api/organizations"))
        .bearer_auth(&token)
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create organization");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("Failed to parse error");
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|msg| msg.contains("already exists"))
    );
}
