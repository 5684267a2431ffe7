//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use luxe_core::{Email, OrganizationId, Role, UserId};

/// A user (domain type).
///
/// Consumers usually carry only a `phone` (provisioned lazily on first OTP
/// login); staff accounts carry an `email` and a password hash. The hash is
/// deliberately not part of this struct - it is only ever fetched by the
/// login path.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Email address, if set.
    pub email: Option<Email>,
    /// Phone number in E.164 form, if set.
    pub phone: Option<String>,
    /// Display name, if set.
    pub name: Option<String>,
    /// Permission level.
    pub role: Role,
    /// Owning organization, if affiliated.
    pub organization_id: Option<OrganizationId>,
    /// Name of the owning organization (joined for listings).
    pub organization_name: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
