//! Category routes.
//!
//! Listing and mutation are staff-only; the assembled tree is public so
//! the storefront navigation can render without a session.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use luxe_core::{CategoryId, Role, Slug};

use crate::db::CategoryRepository;
use crate::db::categories::NewCategory;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::{CategoryTreeNode, CategoryWithMeta};
use crate::state::AppState;

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<CategoryId>,
}

/// Request body for renaming a category.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
}

/// List categories with listing metadata.
///
/// GET /api/categories
///
/// Superadmins see all rows; admins only their own organization's.
///
/// # Errors
///
/// 401 when unauthenticated, 403 for non-staff.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
) -> Result<Json<Vec<CategoryWithMeta>>> {
    let categories = CategoryRepository::new(state.pool())
        .list(auth.org_filter())
        .await?;
    Ok(Json(categories))
}

/// The public category tree.
///
/// GET /api/categories/tree
///
/// # Errors
///
/// 500 if the query fails.
pub async fn tree(State(state): State<AppState>) -> Result<Json<Vec<CategoryTreeNode>>> {
    let categories = CategoryRepository::new(state.pool()).list_all().await?;
    Ok(Json(CategoryTreeNode::build_tree(categories)))
}

/// Create a category.
///
/// POST /api/categories
///
/// # Errors
///
/// 400 when the name is missing or the slug is taken.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryWithMeta>> {
    let name = req
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Category name is required".to_string()))?;

    let slug = Slug::from_title(name);
    let organization_id = match auth.role {
        Role::Admin => auth.organization_id,
        _ => None,
    };

    let category = CategoryRepository::new(state.pool())
        .create(NewCategory {
            name,
            slug: &slug,
            image: req.image.as_deref(),
            parent_id: req.parent_id,
            organization_id,
        })
        .await?;

    Ok(Json(category))
}

/// Rename a category; the slug regenerates from the new name.
///
/// PUT /api/categories/{id}
///
/// # Errors
///
/// 404 for an unknown id, 403 on an ownership mismatch.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<CategoryId>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryWithMeta>> {
    let name = req
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Category name is required".to_string()))?;

    let repo = CategoryRepository::new(state.pool());

    // Verify ownership first
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;
    auth.ensure_can_mutate(existing.organization_id)?;

    let slug = Slug::from_title(name);
    let category = repo.rename(id, name, &slug).await?;

    Ok(Json(category))
}

/// Response for a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Delete a category.
///
/// DELETE /api/categories/{id}
///
/// Products assigned to the category survive with `categoryId = null`
/// (schema-level `ON DELETE SET NULL`).
///
/// # Errors
///
/// 404 for an unknown id, 403 on an ownership mismatch.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<CategoryId>,
) -> Result<Json<DeleteResponse>> {
    let repo = CategoryRepository::new(state.pool());

    // Verify ownership first
    let existing = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;
    auth.ensure_can_mutate(existing.organization_id)?;

    repo.delete(id).await?;

    Ok(Json(DeleteResponse { success: true }))
}
