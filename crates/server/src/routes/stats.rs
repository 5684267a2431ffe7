//! Dashboard stat routes.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::{OrderRepository, OrganizationRepository, ProductRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::{RequireStaff, RequireSuperadmin};
use crate::state::AppState;

/// Organization-scoped dashboard stats.
#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub products: i64,
    pub orders: i64,
    pub revenue: Decimal,
}

/// Global dashboard stats.
#[derive(Debug, Serialize)]
pub struct SuperadminStats {
    pub organizations: i64,
    pub users: i64,
    pub products: i64,
    pub orders: i64,
}

/// Product/order counts and revenue for the caller's organization.
///
/// GET /api/admin/stats
///
/// # Errors
///
/// 400 when the caller has no organization to report on.
pub async fn admin_stats(
    State(state): State<AppState>,
    RequireStaff(auth): RequireStaff,
) -> Result<Json<AdminStats>> {
    let organization_id = auth.organization_id.ok_or_else(|| {
        AppError::BadRequest("User not assigned to an organization".to_string())
    })?;

    let products = ProductRepository::new(state.pool());
    let orders = OrderRepository::new(state.pool());

    let (product_count, order_count, revenue) = tokio::try_join!(
        products.count(Some(organization_id)),
        orders.count(Some(organization_id)),
        orders.revenue(organization_id),
    )?;

    Ok(Json(AdminStats {
        products: product_count,
        orders: order_count,
        revenue,
    }))
}

/// Global organization/user/product/order counts.
///
/// GET /api/superadmin/stats
///
/// # Errors
///
/// 401 when unauthenticated, 403 for non-superadmins.
pub async fn superadmin_stats(
    State(state): State<AppState>,
    RequireSuperadmin(_auth): RequireSuperadmin,
) -> Result<Json<SuperadminStats>> {
    let organizations = OrganizationRepository::new(state.pool());
    let users = UserRepository::new(state.pool());
    let products = ProductRepository::new(state.pool());
    let orders = OrderRepository::new(state.pool());

    let (organization_count, user_count, product_count, order_count) = tokio::try_join!(
        organizations.count_all(),
        users.count_all(),
        products.count(None),
        orders.count(None),
    )?;

    Ok(Json(SuperadminStats {
        organizations: organization_count,
        users: user_count,
        products: product_count,
        orders: order_count,
    }))
}
