//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `OTP_PROVIDER_URL` - Base URL of the phone-OTP identity provider
//! - `OTP_PROVIDER_API_KEY` - API key sent alongside consumer access tokens
//!
//! ## Optional
//! - `LUXE_HOST` - Bind address (default: 127.0.0.1)
//! - `LUXE_PORT` - Listen port (default: 3000)
//! - `ADMIN_SESSION_SECRET` - HMAC key for admin tokens. A development
//!   default exists; the server logs a loud warning when it is active.
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance traces sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Fallback admin token signing secret.
///
/// Must be overridden via `ADMIN_SESSION_SECRET` in any real deployment.
const DEFAULT_ADMIN_SESSION_SECRET: &str = "super-secret-change-in-production-12345";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// HMAC key for admin session tokens
    pub admin_session_secret: SecretString,
    /// Whether the admin token secret is the insecure development default
    pub admin_session_secret_is_default: bool,
    /// OTP identity provider configuration
    pub otp: OtpProviderConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance traces sample rate
    pub sentry_traces_sample_rate: f32,
}

/// OTP identity provider configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct OtpProviderConfig {
    /// Base URL of the provider (e.g. `https://xyz.supabase.co`)
    pub base_url: String,
    /// Project API key sent with every verification request
    pub api_key: SecretString,
}

impl std::fmt::Debug for OtpProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_required_secret("DATABASE_URL")?;
        let host = get_env_or_default("LUXE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("LUXE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("LUXE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("LUXE_PORT".to_string(), e.to_string()))?;

        let (admin_session_secret, admin_session_secret_is_default) =
            match get_optional_env("ADMIN_SESSION_SECRET") {
                Some(value) => (SecretString::from(value), false),
                None => (SecretString::from(DEFAULT_ADMIN_SESSION_SECRET), true),
            };

        let otp = OtpProviderConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_rate("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            database_url,
            host,
            port,
            admin_session_secret,
            admin_session_secret_is_default,
            otp,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Log a warning if the insecure development secret is active.
    pub fn warn_if_insecure(&self) {
        if self.admin_session_secret_is_default {
            tracing::warn!(
                "ADMIN_SESSION_SECRET is not set; using the insecure development \
                 default. Set it before deploying."
            );
        }
    }
}

impl OtpProviderConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: get_required_env("OTP_PROVIDER_URL")?,
            api_key: get_required_secret("OTP_PROVIDER_API_KEY")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional sample-rate variable, clamped to [0.0, 1.0].
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    match get_optional_env(key) {
        None => Ok(default),
        Some(raw) => {
            let rate = raw
                .parse::<f32>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
            Ok(rate.clamp(0.0, 1.0))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            admin_session_secret: SecretString::from("x".repeat(32)),
            admin_session_secret_is_default: false,
            otp: OtpProviderConfig {
                base_url: "https://otp.example.com".to_string(),
                api_key: SecretString::from("anon-key"),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_otp_config_debug_redacts_key() {
        let config = OtpProviderConfig {
            base_url: "https://otp.example.com".to_string(),
            api_key: SecretString::from("super_secret_api_key"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("https://otp.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key"));
    }

    #[test]
    fn test_default_secret_marker() {
        // The development fallback is a known string; deployments must override it.
        assert_eq!(
            DEFAULT_ADMIN_SESSION_SECRET,
            "super-secret-change-in-production-12345"
        );
    }
}
