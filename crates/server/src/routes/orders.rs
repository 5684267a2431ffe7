//! Order routes.
//!
//! Read-only: orders are written by the checkout pipeline outside this
//! service and surface here for the dashboards.

use axum::{Json, extract::State};

use crate::db::OrderRepository;
use crate::error::Result;
use crate::middleware::RequireStaff;
use crate::models::OrderWithItems;
use crate::state::AppState;

/// List orders with buyer contact and line items.
///
/// GET /api/orders
///
/// Superadmins see every order; admins only their own organization's.
///
/// # Errors
///
/// 401 when unauthenticated, 403 for non-staff.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
) -> Result<Json<Vec<OrderWithItems>>> {
    let orders = OrderRepository::new(state.pool())
        .list(auth.org_filter())
        .await?;
    Ok(Json(orders))
}
