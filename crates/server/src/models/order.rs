//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use luxe_core::{OrderId, OrderItemId, OrganizationId, ProductId, UserId};

/// An order placed by a user against an organization.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Organization the order was placed against.
    pub organization_id: OrganizationId,
    /// User who placed the order.
    pub user_id: UserId,
    /// Order total.
    pub total: Decimal,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A single line item on an order.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique line item ID.
    pub id: OrderItemId,
    /// Order this line belongs to.
    pub order_id: OrderId,
    /// Product ordered; null if the product was since deleted.
    pub product_id: Option<ProductId>,
    /// Title of the product (joined; survives product deletion as null).
    pub product_title: Option<String>,
    /// Quantity ordered.
    pub quantity: i32,
    /// Unit price at order time.
    pub unit_price: Decimal,
}

/// An order with buyer contact and line items for the admin listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    /// Buyer's phone, if set.
    pub user_phone: Option<String>,
    /// Buyer's email, if set.
    pub user_email: Option<String>,
    /// Line items.
    pub items: Vec<OrderItem>,
}
