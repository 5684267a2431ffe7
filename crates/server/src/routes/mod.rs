//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check (DB ping)
//!
//! # Admin auth
//! POST /api/admin/auth/login           - Password login, issues admin token
//! POST /api/admin/auth/setup-password  - Dev helper: set a password hash
//!
//! # Consumer identity
//! GET  /api/me                         - Resolve/provision OTP consumer
//!
//! # Catalog & tenants (bearer-gated unless noted)
//! GET|POST       /api/products
//! GET|PUT|DELETE /api/products/{id}
//! GET|POST       /api/categories
//! GET            /api/categories/tree  - Public, no auth
//! PUT|DELETE     /api/categories/{id}
//! GET|POST       /api/organizations
//! GET|PUT|DELETE /api/organizations/{id}
//! GET|POST       /api/users
//! PUT|DELETE     /api/users/{id}
//! GET            /api/orders
//!
//! # Home-page sections
//! GET|POST|PUT   /api/admin/sections   - Bare PUT is the batch reorder
//! GET|PUT|DELETE /api/admin/sections/{id}
//!
//! # Stats
//! GET  /api/admin/stats                - Org-scoped counts + revenue
//! GET  /api/superadmin/stats           - Global counts
//! ```

pub mod admin_auth;
pub mod categories;
pub mod me;
pub mod orders;
pub mod organizations;
pub mod products;
pub mod sections;
pub mod stats;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the admin auth routes router.
pub fn admin_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_auth::login))
        .route("/setup-password", post(admin_auth::setup_password))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route("/tree", get(categories::tree))
        .route(
            "/{id}",
            put(categories::update).delete(categories::delete),
        )
}

/// Create the organization routes router.
pub fn organization_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(organizations::list).post(organizations::create))
        .route(
            "/{id}",
            get(organizations::show)
                .put(organizations::update)
                .delete(organizations::delete),
        )
}

/// Create the user management routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/{id}", put(users::update).delete(users::delete))
}

/// Create the section routes router.
pub fn section_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(sections::list)
                .post(sections::create)
                .put(sections::reorder),
        )
        .route(
            "/{id}",
            get(sections::show)
                .put(sections::update)
                .delete(sections::delete),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/admin/auth", admin_auth_routes())
        .route("/api/me", get(me::me))
        .nest("/api/products", product_routes())
        .nest("/api/categories", category_routes())
        .nest("/api/organizations", organization_routes())
        .nest("/api/users", user_routes())
        .route("/api/orders", get(orders::list))
        .nest("/api/admin/sections", section_routes())
        .route("/api/admin/stats", get(stats::admin_stats))
        .route("/api/superadmin/stats", get(stats::superadmin_stats))
}
