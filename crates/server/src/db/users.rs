//! User repository for database operations.
//!
//! Users cover both consumers (phone-provisioned via OTP login) and staff
//! (email + password hash). Every selecting query joins the owning
//! organization's name for listings.

use sqlx::PgPool;
use uuid::Uuid;

use luxe_core::{Email, OrganizationId, Role, UserId};

use super::RepositoryError;
use crate::models::User;

/// Columns selected for every user row, including the joined organization name.
const USER_SELECT: &str = r"
    SELECT u.id, u.email, u.phone, u.name, u.role, u.organization_id,
           o.name AS organization_name,
           u.created_at, u.updated_at
    FROM users u
    LEFT JOIN organizations o ON o.id = u.organization_id
";

/// Fields for creating a user via the management API.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: Option<&'a Email>,
    pub phone: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub name: Option<&'a str>,
    pub role: Role,
    pub organization_id: Option<OrganizationId>,
}

/// Optional field updates for a user. `None` leaves the column unchanged.
#[derive(Debug, Default)]
pub struct UserUpdate<'a> {
    pub email: Option<&'a Email>,
    pub phone: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub name: Option<&'a str>,
    pub role: Option<Role>,
    pub organization_id: Option<OrganizationId>,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE u.email = $1"))
            .bind(email)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Get a user by their phone number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_phone(&self, phone: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(&format!("{USER_SELECT} WHERE u.phone = $1"))
            .bind(phone)
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Resolve a user from an identity-provider subject.
    ///
    /// The provider subject is used as the local user ID when it parses as
    /// a UUID; otherwise (or when no row matches) the phone number is tried.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_provider_subject(
        &self,
        subject: &str,
        phone: Option<&str>,
    ) -> Result<Option<User>, RepositoryError> {
        if let Ok(uuid) = subject.parse::<Uuid>() {
            if let Some(user) = self.get_by_id(UserId::new(uuid)).await? {
                return Ok(Some(user));
            }
        }
        match phone {
            Some(phone) => self.get_by_phone(phone).await,
            None => Ok(None),
        }
    }

    /// Get a user and their password hash by email.
    ///
    /// The hash is `None` when the account has no password set (OTP-only
    /// accounts).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, Option<String>)>, RepositoryError> {
        let Some(user) = self.get_by_email(email).await? else {
            return Ok(None);
        };

        let hash = sqlx::query_scalar::<_, Option<String>>(
            "SELECT password_hash FROM users WHERE id = $1",
        )
        .bind(user.id)
        .fetch_one(self.pool)
        .await?;

        Ok(Some((user, hash)))
    }

    /// Create a consumer user from their phone number (first OTP login).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the phone is already taken.
    pub async fn create_consumer(&self, phone: &str) -> Result<User, RepositoryError> {
        let id: UserId = sqlx::query_scalar(
            "INSERT INTO users (id, phone, role) VALUES ($1, $2, 'USER') RETURNING id",
        )
        .bind(UserId::generate())
        .bind(phone)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "User"))?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Create a user via the management API.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or phone is taken.
    pub async fn create(&self, new: NewUser<'_>) -> Result<User, RepositoryError> {
        let id: UserId = sqlx::query_scalar(
            r"
            INSERT INTO users (id, email, phone, password_hash, name, role, organization_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            ",
        )
        .bind(UserId::generate())
        .bind(new.email)
        .bind(new.phone)
        .bind(new.password_hash)
        .bind(new.name)
        .bind(new.role)
        .bind(new.organization_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "User"))?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Apply a partial update to a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user does not exist, or
    /// `RepositoryError::Conflict` on a unique violation.
    pub async fn update(
        &self,
        id: UserId,
        update: UserUpdate<'_>,
    ) -> Result<User, RepositoryError> {
        let updated = sqlx::query(
            r"
            UPDATE users SET
                email = COALESCE($2, email),
                phone = COALESCE($3, phone),
                password_hash = COALESCE($4, password_hash),
                name = COALESCE($5, name),
                role = COALESCE($6, role),
                organization_id = COALESCE($7, organization_id),
                updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(update.email)
        .bind(update.phone)
        .bind(update.password_hash)
        .bind(update.name)
        .bind(update.role)
        .bind(update.organization_id)
        .execute(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "User"))?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Set the password hash for the user with the given email.
    ///
    /// Returns `false` if no such user exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_password_hash(
        &self,
        email: &Email,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let updated =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE email = $1")
                .bind(email)
                .bind(password_hash)
                .execute(self.pool)
                .await?;
        Ok(updated.rows_affected() > 0)
    }

    /// Delete a user. Returns `false` if no row was deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }

    /// List users, optionally scoped to one organization, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        organization_id: Option<OrganizationId>,
    ) -> Result<Vec<User>, RepositoryError> {
        let users = match organization_id {
            Some(org_id) => {
                sqlx::query_as::<_, User>(&format!(
                    "{USER_SELECT} WHERE u.organization_id = $1 ORDER BY u.created_at DESC"
                ))
                .bind(org_id)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, User>(&format!("{USER_SELECT} ORDER BY u.created_at DESC"))
                    .fetch_all(self.pool)
                    .await?
            }
        };
        Ok(users)
    }

    /// Count all users (superadmin stats).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_all(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Insert or update a superadmin account (CLI bootstrap).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_superadmin(
        &self,
        email: &Email,
        password_hash: &str,
        name: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let id: UserId = sqlx::query_scalar(
            r"
            INSERT INTO users (id, email, password_hash, name, role)
            VALUES ($1, $2, $3, $4, 'SUPERADMIN')
            ON CONFLICT (email) DO UPDATE
                SET password_hash = EXCLUDED.password_hash,
                    role = 'SUPERADMIN',
                    updated_at = now()
            RETURNING id
            ",
        )
        .bind(UserId::generate())
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }
}
