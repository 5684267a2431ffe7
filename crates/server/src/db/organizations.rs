//! Organization repository for database operations.

use sqlx::PgPool;

use luxe_core::{OrganizationId, Slug};

use super::RepositoryError;
use crate::models::{Organization, OrganizationWithCounts};

/// Columns selected for an organization row with dashboard counts.
const ORG_WITH_COUNTS_SELECT: &str = r"
    SELECT o.id, o.name, o.slug, o.business_categories, o.address,
           o.gst_number, o.business_registration_cert, o.agreement_document,
           o.created_at, o.updated_at,
           (SELECT COUNT(*) FROM users u WHERE u.organization_id = o.id) AS user_count,
           (SELECT COUNT(*) FROM products p WHERE p.organization_id = o.id) AS product_count,
           (SELECT COUNT(*) FROM orders ord WHERE ord.organization_id = o.id) AS order_count
    FROM organizations o
";

/// Fields for creating an organization.
#[derive(Debug)]
pub struct NewOrganization<'a> {
    pub name: &'a str,
    pub slug: &'a Slug,
    pub business_categories: &'a [String],
    pub address: Option<&'a str>,
    pub gst_number: Option<&'a str>,
    pub business_registration_cert: Option<&'a str>,
    pub agreement_document: Option<&'a str>,
}

/// Optional field updates for an organization. `None` leaves the column
/// unchanged.
#[derive(Debug, Default)]
pub struct OrganizationUpdate<'a> {
    pub name: Option<&'a str>,
    pub slug: Option<&'a Slug>,
    pub business_categories: Option<&'a [String]>,
    pub address: Option<&'a str>,
    pub gst_number: Option<&'a str>,
    pub business_registration_cert: Option<&'a str>,
    pub agreement_document: Option<&'a str>,
}

/// Repository for organization database operations.
pub struct OrganizationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrganizationRepository<'a> {
    /// Create a new organization repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all organizations with their row counts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<OrganizationWithCounts>, RepositoryError> {
        let orgs = sqlx::query_as::<_, OrganizationWithCounts>(&format!(
            "{ORG_WITH_COUNTS_SELECT} ORDER BY o.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(orgs)
    }

    /// Get a single organization with counts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(
        &self,
        id: OrganizationId,
    ) -> Result<Option<OrganizationWithCounts>, RepositoryError> {
        let org = sqlx::query_as::<_, OrganizationWithCounts>(&format!(
            "{ORG_WITH_COUNTS_SELECT} WHERE o.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(org)
    }

    /// Get a single organization by slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &Slug) -> Result<Option<Organization>, RepositoryError> {
        let org = sqlx::query_as::<_, Organization>(
            r"
            SELECT id, name, slug, business_categories, address, gst_number,
                   business_registration_cert, agreement_document, created_at, updated_at
            FROM organizations WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;
        Ok(org)
    }

    /// Create an organization.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the slug is already taken.
    pub async fn create(
        &self,
        new: NewOrganization<'_>,
    ) -> Result<OrganizationWithCounts, RepositoryError> {
        let id: OrganizationId = sqlx::query_scalar(
            r"
            INSERT INTO organizations
                (id, name, slug, business_categories, address, gst_number,
                 business_registration_cert, agreement_document)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(OrganizationId::generate())
        .bind(new.name)
        .bind(new.slug)
        .bind(new.business_categories)
        .bind(new.address)
        .bind(new.gst_number)
        .bind(new.business_registration_cert)
        .bind(new.agreement_document)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "Slug"))?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Apply a partial update to an organization.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the organization does not
    /// exist, or `RepositoryError::Conflict` when the new slug is taken.
    pub async fn update(
        &self,
        id: OrganizationId,
        update: OrganizationUpdate<'_>,
    ) -> Result<OrganizationWithCounts, RepositoryError> {
        let updated = sqlx::query(
            r"
            UPDATE organizations SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                business_categories = COALESCE($4, business_categories),
                address = COALESCE($5, address),
                gst_number = COALESCE($6, gst_number),
                business_registration_cert = COALESCE($7, business_registration_cert),
                agreement_document = COALESCE($8, agreement_document),
                updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(update.name)
        .bind(update.slug)
        .bind(update.business_categories)
        .bind(update.address)
        .bind(update.gst_number)
        .bind(update.business_registration_cert)
        .bind(update.agreement_document)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "Slug"))?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete an organization. Returns `false` if no row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrganizationId) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }

    /// Count all organizations (superadmin stats).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM organizations")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}
