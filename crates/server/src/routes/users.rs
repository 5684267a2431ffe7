//! User management routes.
//!
//! Staff-only. Admins operate inside their own organization and can
//! neither escalate roles nor move users across organizations; both are
//! superadmin privileges.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use luxe_core::{Email, OrganizationId, Role, UserId};

use crate::db::UserRepository;
use crate::db::users::{NewUser, UserUpdate};
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::User;
use crate::services::auth::{AuthError, hash_password};
use crate::state::AppState;

/// Request body for creating a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub organization_id: Option<OrganizationId>,
}

/// Request body for updating a user. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub organization_id: Option<OrganizationId>,
}

/// List users.
///
/// GET /api/users
///
/// Superadmins see all users; admins only their own organization's.
///
/// # Errors
///
/// 401 when unauthenticated, 403 for non-staff.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool())
        .list(auth.org_filter())
        .await?;
    Ok(Json(users))
}

/// Create a user.
///
/// POST /api/users
///
/// Admins may only create plain USERs inside their own organization.
///
/// # Errors
///
/// 400 when neither email nor phone is given, 403 when an admin tries to
/// assign a role or a foreign organization.
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<User>> {
    let email = match req.email.as_deref().filter(|e| !e.is_empty()) {
        Some(raw) => Some(Email::parse(raw).map_err(AuthError::InvalidEmail)?),
        None => None,
    };
    let phone = req.phone.as_deref().filter(|p| !p.is_empty());

    if email.is_none() && phone.is_none() {
        return Err(AppError::BadRequest("Email or phone is required".to_string()));
    }

    // Validate role assignment
    if auth.role == Role::Admin {
        if req.role.is_some_and(|r| r != Role::User) {
            return Err(AppError::Forbidden(
                "Admins can only create regular users".to_string(),
            ));
        }
        if req
            .organization_id
            .is_some_and(|org| Some(org) != auth.organization_id)
        {
            return Err(AppError::Forbidden(
                "Cannot create users for other organizations".to_string(),
            ));
        }
    }

    let password_hash = match req.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let organization_id = match auth.role {
        Role::Admin => auth.organization_id,
        _ => req.organization_id,
    };

    let user = UserRepository::new(state.pool())
        .create(NewUser {
            email: email.as_ref(),
            phone,
            password_hash: password_hash.as_deref(),
            name: req.name.as_deref(),
            role: req.role.unwrap_or(Role::User),
            organization_id,
        })
        .await?;

    Ok(Json(user))
}

/// Update a user.
///
/// PUT /api/users/{id}
///
/// Role and organization changes are silently restricted to superadmins;
/// an admin explicitly attempting either gets 403.
///
/// # Errors
///
/// 404 for an unknown id, 403 on cross-tenant access or privilege
/// escalation attempts.
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    let repo = UserRepository::new(state.pool());

    let target = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    if auth.role == Role::Admin {
        auth.ensure_can_mutate(target.organization_id)?;

        // Admins can't change roles or move users to other orgs
        let role_change = req.role.is_some_and(|r| r != target.role);
        let org_change = req
            .organization_id
            .is_some_and(|org| Some(org) != auth.organization_id);
        if role_change || org_change {
            return Err(AppError::Forbidden("Insufficient permissions".to_string()));
        }
    }

    let email = match req.email.as_deref().filter(|e| !e.is_empty()) {
        Some(raw) => Some(Email::parse(raw).map_err(AuthError::InvalidEmail)?),
        None => None,
    };
    let password_hash = match req.password.as_deref().filter(|p| !p.is_empty()) {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let is_superadmin = auth.role == Role::Superadmin;

    let user = repo
        .update(
            id,
            UserUpdate {
                email: email.as_ref(),
                phone: req.phone.as_deref(),
                password_hash: password_hash.as_deref(),
                name: req.name.as_deref(),
                role: req.role.filter(|_| is_superadmin),
                organization_id: req.organization_id.filter(|_| is_superadmin),
            },
        )
        .await?;

    Ok(Json(user))
}

/// Response for a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Delete a user.
///
/// DELETE /api/users/{id}
///
/// Admins may only delete plain USERs of their own organization.
///
/// # Errors
///
/// 404 for an unknown id, 403 on cross-tenant access or when an admin
/// targets another staff account.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
    Path(id): Path<UserId>,
) -> Result<Json<DeleteResponse>> {
    let repo = UserRepository::new(state.pool());

    let target = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    if auth.role == Role::Admin {
        auth.ensure_can_mutate(target.organization_id)?;

        if target.role.is_staff() {
            return Err(AppError::Forbidden("Cannot delete admin users".to_string()));
        }
    }

    repo.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "User deleted".to_string(),
    }))
}
