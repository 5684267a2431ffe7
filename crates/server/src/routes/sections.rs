//! Home-page section routes.
//!
//! Sections are global (not tenant-scoped) and staff-managed. The bare
//! collection `PUT` is the batch reorder: an all-or-nothing multi-row
//! position update in one transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use luxe_core::{SectionId, SectionKind};

use crate::db::SectionRepository;
use crate::db::sections::{NewSection, SectionUpdate};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::Section;
use crate::state::AppState;

/// Request body for creating a section.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSectionRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<SectionKind>,
    pub settings: Option<serde_json::Value>,
    pub is_enabled: Option<bool>,
    #[serde(rename = "order")]
    pub position: Option<i32>,
}

/// Request body for updating a section. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<SectionKind>,
    pub settings: Option<serde_json::Value>,
    pub is_enabled: Option<bool>,
    #[serde(rename = "order")]
    pub position: Option<i32>,
}

/// One entry of the batch reorder payload.
#[derive(Debug, Deserialize)]
pub struct ReorderEntry {
    pub id: SectionId,
    #[serde(rename = "order")]
    pub position: i32,
}

/// Request body for the batch reorder.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub sections: Option<Vec<ReorderEntry>>,
}

/// List all sections in display order.
///
/// GET /api/admin/sections
///
/// # Errors
///
/// 401 when unauthenticated, 403 for non-staff.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_auth): RequireStaff,
) -> Result<Json<Vec<Section>>> {
    let sections = SectionRepository::new(state.pool()).list().await?;
    Ok(Json(sections))
}

/// Fetch a single section.
///
/// GET /api/admin/sections/{id}
///
/// # Errors
///
/// 404 for an unknown id.
pub async fn show(
    State(state): State<AppState>,
    RequireStaff(_auth): RequireStaff,
    Path(id): Path<SectionId>,
) -> Result<Json<Section>> {
    let section = SectionRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Section".to_string()))?;
    Ok(Json(section))
}

/// Create a section, appended at the end when no position is given.
///
/// POST /api/admin/sections
///
/// # Errors
///
/// 400 when title or kind is missing.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(_auth): RequireStaff,
    Json(req): Json<CreateSectionRequest>,
) -> Result<Json<Section>> {
    let title = req
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Section title is required".to_string()))?;
    let kind = req
        .kind
        .ok_or_else(|| AppError::BadRequest("Section type is required".to_string()))?;

    let settings = req.settings.unwrap_or_else(|| serde_json::json!({}));

    let section = SectionRepository::new(state.pool())
        .create(NewSection {
            title,
            kind,
            settings: &settings,
            is_enabled: req.is_enabled.unwrap_or(true),
            position: req.position,
        })
        .await?;

    Ok(Json(section))
}

/// Response for a successful batch reorder.
#[derive(Debug, Serialize)]
pub struct ReorderResponse {
    pub message: String,
}

/// Reorder sections in one all-or-nothing transaction.
///
/// PUT /api/admin/sections
///
/// # Errors
///
/// 400 for a malformed payload, 404 (with rollback) when any id is
/// unknown.
pub async fn reorder(
    State(state): State<AppState>,
    RequireStaff(_auth): RequireStaff,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<ReorderResponse>> {
    let entries = req
        .sections
        .ok_or_else(|| AppError::BadRequest("Invalid data format".to_string()))?;

    let positions: Vec<(SectionId, i32)> =
        entries.iter().map(|e| (e.id, e.position)).collect();

    SectionRepository::new(state.pool())
        .reorder(&positions)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound("Section".to_string()),
            other => other.into(),
        })?;

    Ok(Json(ReorderResponse {
        message: "Sections reordered successfully".to_string(),
    }))
}

/// Update a section.
///
/// PUT /api/admin/sections/{id}
///
/// # Errors
///
/// 404 for an unknown id.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(_auth): RequireStaff,
    Path(id): Path<SectionId>,
    Json(req): Json<UpdateSectionRequest>,
) -> Result<Json<Section>> {
    let section = SectionRepository::new(state.pool())
        .update(
            id,
            SectionUpdate {
                title: req.title.as_deref(),
                kind: req.kind,
                settings: req.settings.as_ref(),
                is_enabled: req.is_enabled,
                position: req.position,
            },
        )
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound("Section".to_string()),
            other => other.into(),
        })?;

    Ok(Json(section))
}

/// Response for a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Delete a section.
///
/// DELETE /api/admin/sections/{id}
///
/// # Errors
///
/// 404 for an unknown id.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(_auth): RequireStaff,
    Path(id): Path<SectionId>,
) -> Result<Json<DeleteResponse>> {
    let deleted = SectionRepository::new(state.pool()).delete(id).await?;

    if !deleted {
        return Err(AppError::NotFound("Section".to_string()));
    }

    Ok(Json(DeleteResponse {
        message: "Section deleted".to_string(),
    }))
}
