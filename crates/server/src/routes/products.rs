//! Product routes.
//!
//! Listing is available to any authenticated caller (consumers browse the
//! same catalog); mutation is staff-only. Admin rows are organization-
//! scoped on list and ownership-checked fetch-then-compare on mutation, so
//! a guessed id from another tenant yields 403.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use luxe_core::{CategoryId, ProductId, Role, Slug};

use crate::db::ProductRepository;
use crate::db::products::{NewProduct, ProductUpdate};
use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, RequireStaff};
use crate::models::Product;
use crate::state::AppState;

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub compare_at_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub postal_codes: Vec<String>,
    pub category_id: Option<CategoryId>,
}

/// Request body for updating a product. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub compare_at_price: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub postal_codes: Option<Vec<String>>,
    pub category_id: Option<CategoryId>,
}

/// List products.
///
/// GET /api/products
///
/// Admins see only their own organization's rows; everyone else sees the
/// whole catalog.
///
/// # Errors
///
/// 401 when unauthenticated.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool())
        .list(auth.org_filter())
        .await?;
    Ok(Json(products))
}

/// Create a product.
///
/// POST /api/products
///
/// Admin-created products land in the admin's organization; superadmin-
/// created products are unowned.
///
/// # Errors
///
/// 400 when title or price is missing, 403 for non-staff.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Json(req): Json<CreateProductRequest>,
) -> Result<Json<Product>> {
    let title = req
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Title and price are required".to_string()))?;
    let price = req
        .price
        .ok_or_else(|| AppError::BadRequest("Title and price are required".to_string()))?;

    let slug = Slug::from_title(title);
    let organization_id = match auth.role {
        Role::Admin => auth.organization_id,
        _ => None,
    };

    let product = ProductRepository::new(state.pool())
        .create(NewProduct {
            title,
            slug: &slug,
            description: req.description.as_deref(),
            price,
            compare_at_price: req.compare_at_price,
            images: &req.images,
            videos: &req.videos,
            postal_codes: &req.postal_codes,
            category_id: req.category_id,
            organization_id,
        })
        .await?;

    Ok(Json(product))
}

/// Fetch a single product.
///
/// GET /api/products/{id}
///
/// # Errors
///
/// 404 for an unknown id, 403 when an admin reaches for another tenant's
/// row.
pub async fn show(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    auth.ensure_can_mutate(product.organization_id)?;

    Ok(Json(product))
}

/// Update a product.
///
/// PUT /api/products/{id}
///
/// The slug regenerates whenever the title changes.
///
/// # Errors
///
/// 404 for an unknown id, 403 on an ownership mismatch.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<ProductId>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let repo = ProductRepository::new(state.pool());

    // Verify ownership first
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
    auth.ensure_can_mutate(existing.organization_id)?;

    let slug = req.title.as_deref().map(Slug::from_title);

    let product = repo
        .update(
            id,
            ProductUpdate {
                title: req.title.as_deref(),
                slug: slug.as_ref(),
                description: req.description.as_deref(),
                price: req.price,
                compare_at_price: req.compare_at_price,
                images: req.images.as_deref(),
                videos: req.videos.as_deref(),
                postal_codes: req.postal_codes.as_deref(),
                category_id: req.category_id,
            },
        )
        .await?;

    Ok(Json(product))
}

/// Response for a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Delete a product.
///
/// DELETE /api/products/{id}
///
/// # Errors
///
/// 404 for an unknown id, 403 on an ownership mismatch.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<Json<DeleteResponse>> {
    let repo = ProductRepository::new(state.pool());

    // Verify ownership first
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
    auth.ensure_can_mutate(existing.organization_id)?;

    repo.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "Product deleted".to_string(),
    }))
}
