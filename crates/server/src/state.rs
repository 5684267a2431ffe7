//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::otp::{OtpError, OtpProviderClient};
use crate::services::token::AdminTokenService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    tokens: AdminTokenService,
    otp: OtpProviderClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The admin token service is constructed here, with the signing secret
    /// injected from configuration - business logic never reads process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the OTP provider client cannot be built.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, OtpError> {
        let tokens = AdminTokenService::new(config.admin_session_secret.clone());
        let otp = OtpProviderClient::new(&config.otp)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                otp,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the admin token service.
    #[must_use]
    pub fn tokens(&self) -> &AdminTokenService {
        &self.inner.tokens
    }

    /// Get a reference to the OTP identity provider client.
    #[must_use]
    pub fn otp(&self) -> &OtpProviderClient {
        &self.inner.otp
    }

    /// Build an auth service borrowing this state's resources.
    #[must_use]
    pub fn auth(&self) -> crate::services::auth::AuthService<'_> {
        crate::services::auth::AuthService::new(self.pool(), self.tokens(), self.otp())
    }
}
