//! Organization (tenant) routes.
//!
//! Staff may list organizations (admins need tenant names for display);
//! creating, reading, updating, and deleting individual organizations is
//! superadmin-only.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use luxe_core::{OrganizationId, Slug};

use crate::db::OrganizationRepository;
use crate::db::organizations::{NewOrganization, OrganizationUpdate};
use crate::error::{AppError, Result};
use crate::middleware::{RequireStaff, RequireSuperadmin};
use crate::models::OrganizationWithCounts;
use crate::state::AppState;

/// Request body for creating an organization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub business_categories: Vec<String>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
    pub business_registration_cert: Option<String>,
    pub agreement_document: Option<String>,
}

/// Request body for updating an organization. Absent fields are left
/// unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub business_categories: Option<Vec<String>>,
    pub address: Option<String>,
    pub gst_number: Option<String>,
    pub business_registration_cert: Option<String>,
    pub agreement_document: Option<String>,
}

/// List all organizations with row counts.
///
/// GET /api/organizations
///
/// # Errors
///
/// 401 when unauthenticated, 403 for non-staff.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_auth): RequireStaff,
) -> Result<Json<Vec<OrganizationWithCounts>>> {
    let orgs = OrganizationRepository::new(state.pool()).list().await?;
    Ok(Json(orgs))
}

/// Create an organization.
///
/// POST /api/organizations
///
/// The slug defaults to one derived from the name; a duplicate slug is a
/// 400 "already exists".
///
/// # Errors
///
/// 400 when the name is missing or the slug is taken, 403 for non-
/// superadmins.
pub async fn create(
    State(state): State<AppState>,
    RequireSuperadmin(_auth): RequireSuperadmin,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<Json<OrganizationWithCounts>> {
    let name = req
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("Organization name is required".to_string()))?;

    let slug = req
        .slug
        .as_deref()
        .filter(|s| !s.is_empty())
        .map_or_else(|| Slug::from_title(name), Slug::from_raw);

    let org = OrganizationRepository::new(state.pool())
        .create(NewOrganization {
            name,
            slug: &slug,
            business_categories: &req.business_categories,
            address: req.address.as_deref(),
            gst_number: req.gst_number.as_deref(),
            business_registration_cert: req.business_registration_cert.as_deref(),
            agreement_document: req.agreement_document.as_deref(),
        })
        .await?;

    tracing::info!(org_id = %org.organization.id, slug = %org.organization.slug, "organization created");

    Ok(Json(org))
}

/// Fetch a single organization.
///
/// GET /api/organizations/{id}
///
/// # Errors
///
/// 404 for an unknown id.
pub async fn show(
    State(state): State<AppState>,
    RequireSuperadmin(_auth): RequireSuperadmin,
    Path(id): Path<OrganizationId>,
) -> Result<Json<OrganizationWithCounts>> {
    let org = OrganizationRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Organization".to_string()))?;
    Ok(Json(org))
}

/// Update an organization.
///
/// PUT /api/organizations/{id}
///
/// Renaming without an explicit slug re-derives the slug from the new
/// name.
///
/// # Errors
///
/// 404 for an unknown id, 400 when the new slug is taken.
pub async fn update(
    State(state): State<AppState>,
    RequireSuperadmin(_auth): RequireSuperadmin,
    Path(id): Path<OrganizationId>,
    Json(req): Json<UpdateOrganizationRequest>,
) -> Result<Json<OrganizationWithCounts>> {
    let explicit_slug = req.slug.as_deref().filter(|s| !s.is_empty()).map(Slug::from_raw);
    let derived_slug = match (&explicit_slug, req.name.as_deref()) {
        (None, Some(name)) if !name.is_empty() => Some(Slug::from_title(name)),
        _ => None,
    };
    let slug = explicit_slug.or(derived_slug);

    let org = OrganizationRepository::new(state.pool())
        .update(
            id,
            OrganizationUpdate {
                name: req.name.as_deref().filter(|n| !n.is_empty()),
                slug: slug.as_ref(),
                business_categories: req.business_categories.as_deref(),
                address: req.address.as_deref(),
                gst_number: req.gst_number.as_deref(),
                business_registration_cert: req.business_registration_cert.as_deref(),
                agreement_document: req.agreement_document.as_deref(),
            },
        )
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound("Organization".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(org))
}

/// Response for a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Delete an organization.
///
/// DELETE /api/organizations/{id}
///
/// # Errors
///
/// 404 for an unknown id.
pub async fn delete(
    State(state): State<AppState>,
    RequireSuperadmin(_auth): RequireSuperadmin,
    Path(id): Path<OrganizationId>,
) -> Result<Json<DeleteResponse>> {
    let deleted = OrganizationRepository::new(state.pool()).delete(id).await?;

    if !deleted {
        return Err(AppError::NotFound("Organization".to_string()));
    }

    Ok(Json(DeleteResponse { success: true }))
}
