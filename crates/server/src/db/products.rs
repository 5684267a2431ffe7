//! Product repository for database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;

use luxe_core::{CategoryId, OrganizationId, ProductId, Slug};

use super::RepositoryError;
use crate::models::Product;

/// Columns selected for every product row, including joined names.
const PRODUCT_SELECT: &str = r"
    SELECT p.id, p.title, p.slug, p.description, p.price, p.compare_at_price,
           p.images, p.videos, p.postal_codes, p.category_id, p.organization_id,
           c.name AS category_name, c.slug AS category_slug,
           o.name AS organization_name,
           p.created_at, p.updated_at
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
    LEFT JOIN organizations o ON o.id = p.organization_id
";

/// Fields for creating a product.
#[derive(Debug)]
pub struct NewProduct<'a> {
    pub title: &'a str,
    pub slug: &'a Slug,
    pub description: Option<&'a str>,
    pub price: Decimal,
    pub compare_at_price: Option<Decimal>,
    pub images: &'a [String],
    pub videos: &'a [String],
    pub postal_codes: &'a [String],
    pub category_id: Option<CategoryId>,
    pub organization_id: Option<OrganizationId>,
}

/// Optional field updates for a product. `None` leaves the column unchanged.
#[derive(Debug, Default)]
pub struct ProductUpdate<'a> {
    pub title: Option<&'a str>,
    pub slug: Option<&'a Slug>,
    pub description: Option<&'a str>,
    pub price: Option<Decimal>,
    pub compare_at_price: Option<Decimal>,
    pub images: Option<&'a [String]>,
    pub videos: Option<&'a [String]>,
    pub postal_codes: Option<&'a [String]>,
    pub category_id: Option<CategoryId>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, optionally scoped to one organization, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        organization_id: Option<OrganizationId>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = match organization_id {
            Some(org_id) => {
                sqlx::query_as::<_, Product>(&format!(
                    "{PRODUCT_SELECT} WHERE p.organization_id = $1 ORDER BY p.created_at DESC"
                ))
                .bind(org_id)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!(
                    "{PRODUCT_SELECT} ORDER BY p.created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };
        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(product)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` when the slug is already taken.
    pub async fn create(&self, new: NewProduct<'_>) -> Result<Product, RepositoryError> {
        let id: ProductId = sqlx::query_scalar(
            r"
            INSERT INTO products
                (id, title, slug, description, price, compare_at_price,
                 images, videos, postal_codes, category_id, organization_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            ",
        )
        .bind(ProductId::generate())
        .bind(new.title)
        .bind(new.slug)
        .bind(new.description)
        .bind(new.price)
        .bind(new.compare_at_price)
        .bind(new.images)
        .bind(new.videos)
        .bind(new.postal_codes)
        .bind(new.category_id)
        .bind(new.organization_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "Slug"))?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Apply a partial update to a product.
    ///
    /// The caller is responsible for the ownership check; this method only
    /// touches the row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist,
    /// or `RepositoryError::Conflict` when the new slug is taken.
    pub async fn update(
        &self,
        id: ProductId,
        update: ProductUpdate<'_>,
    ) -> Result<Product, RepositoryError> {
        let updated = sqlx::query(
            r"
            UPDATE products SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                compare_at_price = COALESCE($6, compare_at_price),
                images = COALESCE($7, images),
                videos = COALESCE($8, videos),
                postal_codes = COALESCE($9, postal_codes),
                category_id = COALESCE($10, category_id),
                updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(update.title)
        .bind(update.slug)
        .bind(update.description)
        .bind(update.price)
        .bind(update.compare_at_price)
        .bind(update.images)
        .bind(update.videos)
        .bind(update.postal_codes)
        .bind(update.category_id)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "Slug"))?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Delete a product. Returns `false` if no row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }

    /// Count products, optionally scoped to one organization (stats).
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
                    "SELECT COUNT(*) FROM products WHERE organization_id = $1",
                )
                .bind(org_id)
                .fetch_one(self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
                    .fetch_one(self.pool)
                    .await?
            }
        };
        Ok(count)
    }
}
