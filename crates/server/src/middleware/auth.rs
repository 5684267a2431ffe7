//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring bearer authentication in route
//! handlers. The same endpoints accept either an admin session token or an
//! OTP identity-provider access token; resolution is delegated to
//! [`AuthService::resolve_bearer`](crate::services::auth::AuthService::resolve_bearer).
//!
//! A missing or wrong-scheme `Authorization` header is rejected before any
//! storage access happens.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use luxe_core::Role;

use crate::error::AppError;
use crate::services::auth::AuthContext;
use crate::state::AppState;

/// Extractor that requires any authenticated user.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     RequireAuth(auth): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", auth.user_id)
/// }
/// ```
pub struct RequireAuth(pub AuthContext);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;

        let auth = state
            .auth()
            .resolve_bearer(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(Self(auth))
    }
}

/// Extractor that requires an ADMIN or SUPERADMIN.
///
/// An authenticated USER gets 403; an unresolved credential gets 401.
pub struct RequireStaff(pub AuthContext);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(auth) = RequireAuth::from_request_parts(parts, state).await?;

        if !auth.role.is_staff() {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        Ok(Self(auth))
    }
}

/// Extractor that requires a SUPERADMIN.
pub struct RequireSuperadmin(pub AuthContext);

impl FromRequestParts<AppState> for RequireSuperadmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(auth) = RequireAuth::from_request_parts(parts, state).await?;

        if auth.role != Role::Superadmin {
            return Err(AppError::Forbidden(
                "Only superadmins can access this resource".to_string(),
            ));
        }

        Ok(Self(auth))
    }
}

/// Extract the bearer token from the `Authorization` header, if present
/// and well-formed. Purely syntactic: no verification, no storage access.
pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/products");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_present() {
        let parts = parts_with_auth(Some("Bearer abc.def"));
        assert_eq!(bearer_token(&parts), Some("abc.def"));
    }

    #[test]
    fn test_missing_header_rejected() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        assert_eq!(bearer_token(&parts_with_auth(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with_auth(Some("bearer abc"))), None);
        assert_eq!(bearer_token(&parts_with_auth(Some("abc"))), None);
    }

    #[test]
    fn test_empty_token_rejected() {
        assert_eq!(bearer_token(&parts_with_auth(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with_auth(Some("Bearer    "))), None);
    }
}
