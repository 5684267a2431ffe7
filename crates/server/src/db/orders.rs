//! Order repository for database operations.
//!
//! Orders are read-only from the API's perspective; they are written by the
//! checkout pipeline, which lives outside this service.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use luxe_core::{OrderId, OrganizationId};

use super::RepositoryError;
use crate::models::{Order, OrderItem, OrderWithItems};

#[derive(FromRow)]
struct OrderRow {
    #[sqlx(flatten)]
    order: Order,
    user_phone: Option<String>,
    user_email: Option<String>,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders with buyer contact and items, optionally scoped to one
    /// organization, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        organization_id: Option<OrganizationId>,
    ) -> Result<Vec<OrderWithItems>, RepositoryError> {
        const ORDER_SELECT: &str = r"
            SELECT ord.id, ord.organization_id, ord.user_id, ord.total,
                   ord.created_at, ord.updated_at,
                   u.phone AS user_phone, u.email AS user_email
            FROM orders ord
            LEFT JOIN users u ON u.id = ord.user_id
        ";

        let rows = match organization_id {
            Some(org_id) => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{ORDER_SELECT} WHERE ord.organization_id = $1 ORDER BY ord.created_at DESC"
                ))
                .bind(org_id)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, OrderRow>(&format!(
                    "{ORDER_SELECT} ORDER BY ord.created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // One query for all line items, grouped in memory
        let order_ids: Vec<uuid::Uuid> = rows.iter().map(|r| r.order.id.as_uuid()).collect();
        let items = sqlx::query_as::<_, OrderItem>(
            r"
            SELECT i.id, i.order_id, i.product_id, p.title AS product_title,
                   i.quantity, i.unit_price
            FROM order_items i
            LEFT JOIN products p ON p.id = i.product_id
            WHERE i.order_id = ANY($1)
            ORDER BY i.id
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_order: HashMap<OrderId, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let items = by_order.remove(&row.order.id).unwrap_or_default();
                OrderWithItems {
                    order: row.order,
                    user_phone: row.user_phone,
                    user_email: row.user_email,
                    items,
                }
            })
            .collect())
    }

    /// Count orders, optionally scoped to one organization (stats).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(
        &self,
        organization_id: Option<OrganizationId>,
    ) -> Result<i64, RepositoryError> {
        let count = match organization_id {
            Some(org_id) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM orders WHERE organization_id = $1",
                )
                .bind(org_id)
                .fetch_one(self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
                    .fetch_one(self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    /// Sum of order totals for one organization (revenue stat).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn revenue(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Decimal, RepositoryError> {
        let sum = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(total) FROM orders WHERE organization_id = $1",
        )
        .bind(organization_id)
        .fetch_one(self.pool)
        .await?;
        Ok(sum.unwrap_or_default())
    }
}
