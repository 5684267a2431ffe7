//! Superadmin bootstrap command.
//!
//! Upserts a SUPERADMIN account with a fresh argon2 password hash, so the
//! first operator can log into the dashboard of an empty deployment.

use luxe_core::Email;
use luxe_server::db::UserRepository;
use luxe_server::services::auth::hash_password;

use super::CommandError;

/// Create or reset a superadmin account.
///
/// # Errors
///
/// Returns `CommandError` if the email is invalid, hashing fails, or the
/// database write fails.
pub async fn create(
    email: &str,
    password: &str,
    name: Option<&str>,
) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let hash = hash_password(password)?;

    let pool = super::connect().await?;

    let user = UserRepository::new(&pool)
        .upsert_superadmin(&email, &hash, name)
        .await?;

    tracing::info!(user_id = %user.id, email = %email, "superadmin ready");
    Ok(())
}
