//! Integration tests for organization scoping and cross-tenant access.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p luxe-server)
//! - A bootstrap superadmin (cargo run -p luxe-cli -- superadmin ...)
//!
//! Run with: cargo test -p luxe-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use luxe_integration_tests::{base_url, client, login, superadmin_token};

/// Create an organization and an admin inside it; returns
/// (organization id, admin bearer token).
async fn provision_tenant(client: &Client, super_token: &str, tag: &str) -> (String, String) {
    let nonce = Uuid::new_v4().simple().to_string();
    let base = base_url();

    let org: Value = client
        .post(format!("{base}/api/organizations"))
        .bearer_auth(super_token)
        .json(&json!({ "name": format!("Test Org {tag} {nonce}") }))
        .send()
        .await
        .expect("Failed to create organization")
        .json()
        .await
        .expect("Failed to parse organization");
    let org_id = org["id"].as_str().expect("org id").to_string();

    let email = format!("admin-{tag}-{nonce}@test.example");
    let resp = client
        .post(format!("{base}/api/users"))
        .bearer_auth(super_token)
        .json(&json!({
            "email": email,
            "password": "test-password-1",
            "role": "ADMIN",
            "organizationId": org_id,
        }))
        .send()
        .await
        .expect("Failed to create admin user");
    assert!(resp.status().is_success(), "user create: {}", resp.status());

    let body = login(client, &email, "test-password-1").await;
    let token = body["token"].as_str().expect("token").to_string();

    (org_id, token)
}

/// Create a product as the given bearer; returns its id.
async fn create_product(client: &Client, token: &str, title: &str) -> String {
    let product: Value = client
        .post(format!("{}/api/products", base_url()))
        .bearer_auth(token)
        .json(&json!({ "title": title, "price": "19.99" }))
        .send()
        .await
        .expect("Failed to create product")
        .json()
        .await
        .expect("Failed to parse product");
    product["id"].as_str().expect("product id").to_string()
}

// ============================================================================
// List Scoping Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server, database, and bootstrap superadmin"]
async fn test_admin_list_is_scoped_to_own_organization() {
    let client = client();
    let super_token = superadmin_token(&client).await;

    let (org_a, token_a) = provision_tenant(&client, &super_token, "a").await;
    let (org_b, token_b) = provision_tenant(&client, &super_token, "b").await;

    let nonce = Uuid::new_v4().simple().to_string();
    create_product(&client, &token_a, &format!("A Widget {nonce}")).await;
    create_product(&client, &token_b, &format!("B Widget {nonce}")).await;

    // Admin A must see only org A rows
    let products: Vec<Value> = client
        .get(format!("{}/api/products", base_url()))
        .bearer_auth(&token_a)
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse products");

    assert!(!products.is_empty());
    for product in &products {
        assert_eq!(
            product["organizationId"].as_str(),
            Some(org_a.as_str()),
            "admin A saw a row from another tenant: {product}"
        );
    }
    assert!(
        !products
            .iter()
            .any(|p| p["organizationId"].as_str() == Some(org_b.as_str()))
    );
}

#[tokio::test]
#[ignore = "Requires running server, database, and bootstrap superadmin"]
async fn test_superadmin_list_spans_organizations() {
    let client = client();
    let super_token = superadmin_token(&client).await;

    let (org_a, token_a) = provision_tenant(&client, &super_token, "a").await;
    let (org_b, token_b) = provision_tenant(&client, &super_token, "b").await;

    let nonce = Uuid::new_v4().simple().to_string();
    create_product(&client, &token_a, &format!("A Gadget {nonce}")).await;
    create_product(&client, &token_b, &format!("B Gadget {nonce}")).await;

    let products: Vec<Value> = client
        .get(format!("{}/api/products", base_url()))
        .bearer_auth(&super_token)
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse products");

    let orgs: Vec<_> = products
        .iter()
        .filter_map(|p| p["organizationId"].as_str())
        .collect();
    assert!(orgs.contains(&org_a.as_str()));
    assert!(orgs.contains(&org_b.as_str()));
}

// ============================================================================
// Cross-Tenant Mutation Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server, database, and bootstrap superadmin"]
async fn test_cross_tenant_update_forbidden() {
    let client = client();
    let super_token = superadmin_token(&client).await;

    let (_org_a, token_a) = provision_tenant(&client, &super_token, "a").await;
    let (_org_b, token_b) = provision_tenant(&client, &super_token, "b").await;

    let nonce = Uuid::new_v4().simple().to_string();
    let product_b = create_product(&client, &token_b, &format!("B Item {nonce}")).await;

    // Admin A holds a valid, existing id from tenant B - still 403
    let resp = client
        .put(format!("{}/api/products/{product_b}", base_url()))
        .bearer_auth(&token_a)
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .delete(format!("{}/api/products/{product_b}", base_url()))
        .bearer_auth(&token_a)
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // And the row is untouched for its owner
    let resp = client
        .get(format!("{}/api/products/{product_b}", base_url()))
        .bearer_auth(&token_b)
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server, database, and bootstrap superadmin"]
async fn test_admin_cannot_escalate_roles() {
    let client = client();
    let super_token = superadmin_token(&client).await;

    let (org_a, token_a) = provision_tenant(&client, &super_token, "a").await;

    // Create a plain user inside org A
    let nonce = Uuid::new_v4().simple().to_string();
    let user: Value = client
        .post(format!("{}/api/users", base_url()))
        .bearer_auth(&super_token)
        .json(&json!({
            "phone": format!("+1555{}", &nonce[..7]),
            "organizationId": org_a,
        }))
        .send()
        .await
        .expect("Failed to create user")
        .json()
        .await
        .expect("Failed to parse user");
    let user_id = user["id"].as_str().expect("user id");

    // The tenant admin may not promote them
    let resp = client
        .put(format!("{}/api/users/{user_id}", base_url()))
        .bearer_auth(&token_a)
        .json(&json!({ "role": "ADMIN" }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
