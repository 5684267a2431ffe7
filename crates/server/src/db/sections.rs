//! Home-page section repository for database operations.

use sqlx::PgPool;

use luxe_core::{SectionId, SectionKind};

use super::RepositoryError;
use crate::models::Section;

const SECTION_SELECT: &str = r"
    SELECT id, title, kind, settings, is_enabled, position, created_at, updated_at
    FROM sections
";

/// Fields for creating a section.
#[derive(Debug)]
pub struct NewSection<'a> {
    pub title: &'a str,
    pub kind: SectionKind,
    pub settings: &'a serde_json::Value,
    pub is_enabled: bool,
    /// Sort position; appended after the current maximum when `None`.
    pub position: Option<i32>,
}

/// Optional field updates for a section. `None` leaves the column unchanged.
#[derive(Debug, Default)]
pub struct SectionUpdate<'a> {
    pub title: Option<&'a str>,
    pub kind: Option<SectionKind>,
    pub settings: Option<&'a serde_json::Value>,
    pub is_enabled: Option<bool>,
    pub position: Option<i32>,
}

/// Repository for section database operations.
pub struct SectionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SectionRepository<'a> {
    /// Create a new section repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all sections in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Section>, RepositoryError> {
        let sections =
            sqlx::query_as::<_, Section>(&format!("{SECTION_SELECT} ORDER BY position ASC"))
                .fetch_all(self.pool)
                .await?;
        Ok(sections)
    }

    /// Get a section by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: SectionId) -> Result<Option<Section>, RepositoryError> {
        let section = sqlx::query_as::<_, Section>(&format!("{SECTION_SELECT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(section)
    }

    /// Create a section, appending it after the current maximum position
    /// when none is given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: NewSection<'_>) -> Result<Section, RepositoryError> {
        let position = match new.position {
            Some(position) => position,
            None => {
                let max: Option<i32> =
                    sqlx::query_scalar("SELECT MAX(position) FROM sections")
                        .fetch_one(self.pool)
                        .await?;
                max.unwrap_or(0) + 1
            }
        };

        let id: SectionId = sqlx::query_scalar(
            r"
            INSERT INTO sections (id, title, kind, settings, is_enabled, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(SectionId::generate())
        .bind(new.title)
        .bind(new.kind)
        .bind(new.settings)
        .bind(new.is_enabled)
        .bind(position)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Apply a partial update to a section.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the section does not exist.
    pub async fn update(
        &self,
        id: SectionId,
        update: SectionUpdate<'_>,
    ) -> Result<Section, RepositoryError> {
        let updated = sqlx::query(
            r"
            UPDATE sections SET
                title = COALESCE($2, title),
                kind = COALESCE($3, kind),
                settings = COALESCE($4, settings),
                is_enabled = COALESCE($5, is_enabled),
                position = COALESCE($6, position),
                updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(update.title)
        .bind(update.kind)
        .bind(update.settings)
        .bind(update.is_enabled)
        .bind(update.position)
        .execute(self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Reorder sections in one transaction.
    ///
    /// All-or-nothing: if any referenced section is missing the whole batch
    /// rolls back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if any section id is unknown,
    /// `RepositoryError::Database` for other failures.
    pub async fn reorder(&self, positions: &[(SectionId, i32)]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for (id, position) in positions {
            let updated =
                sqlx::query("UPDATE sections SET position = $2, updated_at = now() WHERE id = $1")
                    .bind(id)
                    .bind(position)
                    .execute(&mut *tx)
                    .await?;

            if updated.rows_affected() == 0 {
                // Implicit rollback when tx drops
                return Err(RepositoryError::NotFound);
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a section. Returns `false` if no row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: SectionId) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }
}
