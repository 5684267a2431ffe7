//! OTP identity provider client.
//!
//! Consumers authenticate by phone OTP against a third-party identity
//! provider; the provider's access token then arrives here as a bearer
//! credential. This client asks the provider whether such a token belongs
//! to a live session, and if so, who the subject is.
//!
//! OTP delivery itself is entirely the provider's concern.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::OtpProviderConfig;

/// Errors that can occur when talking to the identity provider.
#[derive(Debug, Error)]
pub enum OtpError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an unexpected response.
    #[error("provider error: {status} - {message}")]
    Provider { status: u16, message: String },

    /// Client could not be constructed from configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// The subject of a confirmed provider session.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpUser {
    /// Provider-side subject identifier.
    pub id: String,
    /// Verified phone number, if the provider has one.
    pub phone: Option<String>,
}

/// Client for the phone-OTP identity provider.
#[derive(Clone)]
pub struct OtpProviderClient {
    client: reqwest::Client,
    base_url: String,
}

impl OtpProviderClient {
    /// Create a new provider client.
    ///
    /// # Errors
    ///
    /// Returns `OtpError::Config` if the HTTP client cannot be built from
    /// the configured API key.
    pub fn new(config: &OtpProviderConfig) -> Result<Self, OtpError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|e| OtpError::Config(format!("invalid API key format: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Look up the session behind an access token.
    ///
    /// Returns `Ok(None)` when the provider rejects the token (not an
    /// error: the caller treats it as "not this kind of credential").
    ///
    /// # Errors
    ///
    /// Returns `OtpError` when the provider is unreachable or answers with
    /// something other than a session or a clean rejection.
    pub async fn get_user(&self, access_token: &str) -> Result<Option<OtpUser>, OtpError> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OtpError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let user: OtpUser = response.json().await?;
        Ok(Some(user))
    }
}
