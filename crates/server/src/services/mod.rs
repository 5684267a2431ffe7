//! Business-logic services.

pub mod auth;
pub mod otp;
pub mod token;

pub use auth::{AuthContext, AuthError, AuthService, BearerCredential};
pub use otp::{OtpError, OtpProviderClient, OtpUser};
pub use token::{AdminTokenClaims, AdminTokenService};
