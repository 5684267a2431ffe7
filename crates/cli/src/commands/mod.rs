//! CLI command implementations.

pub mod hash;
pub mod migrate;
pub mod seed;
pub mod superadmin;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Repository error: {0}")]
    Repository(#[from] luxe_server::db::RepositoryError),

    #[error("Auth error: {0}")]
    Auth(#[from] luxe_server::services::auth::AuthError),

    #[error("Invalid email: {0}")]
    Email(#[from] luxe_core::EmailError),
}

/// Connect to the database named by `DATABASE_URL`.
pub(crate) async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(luxe_server::db::create_pool(&database_url).await?)
}
