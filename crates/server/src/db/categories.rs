//! Category repository for database operations.
//!
//! Category deletion must leave products uncategorized rather than deleting
//! them; that invariant lives in the schema (`products.category_id` is
//! `ON DELETE SET NULL`), not in the queries here.

use sqlx::PgPool;

use luxe_core::{CategoryId, OrganizationId, Slug};

use super::RepositoryError;
use crate::models::{Category, CategoryWithMeta};

/// Columns selected for a category row with listing metadata.
const CATEGORY_WITH_META_SELECT: &str = r"
    SELECT c.id, c.name, c.slug, c.image, c.parent_id, c.organization_id,
           c.created_at, c.updated_at,
           o.name AS organization_name,
           (SELECT COUNT(*) FROM products p WHERE p.category_id = c.id) AS product_count
    FROM categories c
    LEFT JOIN organizations o ON o.id = c.organization_id
";

/// Fields for creating a category.
#[derive(Debug)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub slug: &'a Slug,
    pub image: Option<&'a str>,
    pub parent_id: Option<CategoryId>,
    pub organization_id: Option<OrganizationId>,
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List categories with metadata, optionally scoped to one
    /// organization, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        organization_id: Option<OrganizationId>,
    ) -> Result<Vec<CategoryWithMeta>, RepositoryError> {
        let categories = match organization_id {
            Some(org_id) => {
                sqlx::query_as::<_, CategoryWithMeta>(&format!(
                    "{CATEGORY_WITH_META_SELECT} WHERE c.organization_id = $1 \
                     ORDER BY c.created_at DESC"
                ))
                .bind(org_id)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, CategoryWithMeta>(&format!(
                    "{CATEGORY_WITH_META_SELECT} ORDER BY c.created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };
        Ok(categories)
    }

    /// List every category, name-ordered, for tree assembly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            r"
            SELECT id, name, slug, image, parent_id, organization_id, created_at, updated_at
            FROM categories ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(categories)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r"
            SELECT id, name, slug, image, parent_id, organization_id, created_at, updated_at
            FROM categories WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(category)
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the slug is already taken.
    pub async fn create(&self, new: NewCategory<'_>) -> Result<CategoryWithMeta, RepositoryError> {
        let id: CategoryId = sqlx::query_scalar(
            r"
            INSERT INTO categories (id, name, slug, image, parent_id, organization_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(CategoryId::generate())
        .bind(new.name)
        .bind(new.slug)
        .bind(new.image)
        .bind(new.parent_id)
        .bind(new.organization_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "Slug"))?;

        self.get_with_meta(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Rename a category, regenerating its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist,
    /// or `RepositoryError::Conflict` when the new slug is taken.
    pub async fn rename(
        &self,
        id: CategoryId,
        name: &str,
        slug: &Slug,
    ) -> Result<CategoryWithMeta, RepositoryError> {
        let updated = sqlx::query(
            "UPDATE categories SET name = $2, slug = $3, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(name)
        .bind(slug)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "Slug"))?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_with_meta(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a category. Products keep existing with a null category.
    ///
    /// Returns `false` if no row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }

    async fn get_with_meta(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryWithMeta>, RepositoryError> {
        let category = sqlx::query_as::<_, CategoryWithMeta>(&format!(
            "{CATEGORY_WITH_META_SELECT} WHERE c.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(category)
    }
}
