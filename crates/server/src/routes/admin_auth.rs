//! Admin authentication routes.
//!
//! Password login for staff accounts. A successful login returns the
//! self-contained admin session token; there is no server-side session row
//! to create or destroy.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use luxe_core::{Email, OrganizationId, Role, UserId};

use crate::error::{AppError, Result};
use crate::services::auth::{AuthError, hash_password};
use crate::state::AppState;

/// Request body for password login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: UserId,
    pub email: Option<Email>,
    pub role: Role,
    pub organization_id: Option<OrganizationId>,
    pub token: String,
}

/// Login with email and password.
///
/// POST /api/admin/auth/login
///
/// # Errors
///
/// 400 when a field is missing, 401 for unknown email / wrong password /
/// account without a password, 403 for non-staff accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = req
        .email
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(AuthError::MissingField("Email and password"))?;
    let password = req
        .password
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(AuthError::MissingField("Email and password"))?;

    let (user, token) = state.auth().login_with_password(email, password).await?;

    tracing::info!(user_id = %user.id, role = %user.role, "admin login");

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        role: user.role,
        organization_id: user.organization_id,
        token,
    }))
}

/// Request body for the password setup helper.
#[derive(Debug, Deserialize)]
pub struct SetupPasswordRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for the password setup helper.
#[derive(Debug, Serialize)]
pub struct SetupPasswordResponse {
    pub success: bool,
    pub message: String,
}

/// Set a password hash for an existing user.
///
/// POST /api/admin/auth/setup-password
///
/// Development helper for provisioning test accounts; the hash replaces
/// whatever was stored before.
///
/// # Errors
///
/// 400 when a field is missing, 404 for an unknown email.
pub async fn setup_password(
    State(state): State<AppState>,
    Json(req): Json<SetupPasswordRequest>,
) -> Result<Json<SetupPasswordResponse>> {
    let email = req
        .email
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(AuthError::MissingField("Email and password"))?;
    let password = req
        .password
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(AuthError::MissingField("Email and password"))?;

    let email = Email::parse(email).map_err(AuthError::InvalidEmail)?;
    let hash = hash_password(password)?;

    let updated = crate::db::UserRepository::new(state.pool())
        .set_password_hash(&email, &hash)
        .await
        .map_err(AuthError::Repository)?;

    if !updated {
        return Err(AppError::NotFound("User".to_string()));
    }

    Ok(Json(SetupPasswordResponse {
        success: true,
        message: format!("Password set for {email}"),
    }))
}
