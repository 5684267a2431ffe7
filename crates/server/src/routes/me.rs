//! Consumer identity route.
//!
//! Consumers only ever hold an OTP identity-provider access token, so this
//! endpoint verifies against the provider directly (admin tokens have their
//! own login response and no use for `/api/me`).

use axum::{Json, extract::State, http::request::Parts};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::middleware::auth::bearer_token;
use crate::models::User;
use crate::state::AppState;

/// Response envelope for the current user.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
}

/// Resolve the consumer behind an OTP session, provisioning them on first
/// login.
///
/// GET /api/me
///
/// # Errors
///
/// 401 when the bearer token is missing or the provider rejects it.
pub async fn me(State(state): State<AppState>, parts: Parts) -> Result<Json<MeResponse>> {
    let token = bearer_token(&parts).ok_or(AppError::Unauthorized)?;

    let provider_user = state
        .otp()
        .get_user(token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let user = state.auth().get_or_create_consumer(&provider_user).await?;

    Ok(Json(MeResponse { user }))
}
