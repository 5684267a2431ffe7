//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use luxe_core::{CategoryId, OrganizationId, ProductId, Slug};

/// A product belonging to at most one organization and at most one category.
///
/// The `category_name`/`category_slug`/`organization_name` columns are
/// joined in by the repository for listings and detail views.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Slug derived deterministically from the title.
    pub slug: Slug,
    /// Long-form description, if set.
    pub description: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Strike-through comparison price, if set.
    pub compare_at_price: Option<Decimal>,
    /// Ordered image URLs.
    pub images: Vec<String>,
    /// Ordered video URLs.
    pub videos: Vec<String>,
    /// Postal codes this product can be delivered to.
    pub postal_codes: Vec<String>,
    /// Category, if assigned.
    pub category_id: Option<CategoryId>,
    /// Owning organization, if any.
    pub organization_id: Option<OrganizationId>,
    /// Name of the assigned category (joined).
    pub category_name: Option<String>,
    /// Slug of the assigned category (joined).
    pub category_slug: Option<String>,
    /// Name of the owning organization (joined).
    pub organization_name: Option<String>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
