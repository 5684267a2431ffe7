//! Organization (tenant) domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use luxe_core::{OrganizationId, Slug};

/// A tenant record.
///
/// Owns users, products, categories, and orders. Only superadmins may
/// create or delete organizations.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Unique organization ID.
    pub id: OrganizationId,
    /// Display name.
    pub name: String,
    /// Unique URL slug.
    pub slug: Slug,
    /// Business categories this tenant sells in.
    pub business_categories: Vec<String>,
    /// Registered address, if provided.
    pub address: Option<String>,
    /// Tax registration number, if provided.
    pub gst_number: Option<String>,
    /// Reference to the uploaded business registration certificate.
    pub business_registration_cert: Option<String>,
    /// Reference to the signed platform agreement.
    pub agreement_document: Option<String>,
    /// When the organization was created.
    pub created_at: DateTime<Utc>,
    /// When the organization was last updated.
    pub updated_at: DateTime<Utc>,
}

/// An organization with row counts for dashboard listings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationWithCounts {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub organization: Organization,
    /// Number of users affiliated with this organization.
    pub user_count: i64,
    /// Number of products owned by this organization.
    pub product_count: i64,
    /// Number of orders placed against this organization.
    pub order_count: i64,
}
