//! Authentication service.
//!
//! Two credential shapes reach the same endpoints: the self-contained
//! admin token minted by password login, and the OTP identity provider's
//! access token carried by consumers. [`AuthService::resolve_bearer`] is
//! the single dispatcher over that union; route handlers only ever see the
//! resolved [`AuthContext`].

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use luxe_core::{Email, OrganizationId, Role, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::User;
use crate::services::otp::{OtpError, OtpProviderClient, OtpUser};
use crate::services::token::{AdminTokenClaims, AdminTokenService};

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] luxe_core::EmailError),

    /// A required request field was missing.
    #[error("{0} missing")]
    MissingField(&'static str),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account exists but has no password hash set.
    #[error("password not set for this account")]
    PasswordNotSet,

    /// The account is not an admin or superadmin.
    #[error("account is not staff")]
    NotStaff,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Identity provider error.
    #[error("identity provider error: {0}")]
    Otp(#[from] OtpError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// The resolved identity of an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// The authenticated user.
    pub user_id: UserId,
    /// Their live role (read from storage, not the token).
    pub role: Role,
    /// Their organization, if affiliated.
    pub organization_id: Option<OrganizationId>,
}

impl AuthContext {
    /// The organization filter this caller's list queries must apply:
    /// `None` means unscoped. Only ADMIN rows are scoped; superadmins see
    /// everything and consumers browse the shared catalog.
    #[must_use]
    pub const fn org_filter(&self) -> Option<OrganizationId> {
        match self.role {
            Role::Admin => self.organization_id,
            _ => None,
        }
    }

    /// Check that this caller may mutate a row owned by `row_org`.
    ///
    /// Superadmins may mutate anything; admins only rows of their own
    /// organization. Applied fetch-then-compare by every mutation handler
    /// so a guessed id from another tenant yields 403, not a mutation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Forbidden` on an ownership mismatch.
    pub fn ensure_can_mutate(&self, row_org: Option<OrganizationId>) -> Result<(), AppError> {
        if self.role == Role::Superadmin {
            return Ok(());
        }
        match self.organization_id {
            Some(own) if row_org == Some(own) => Ok(()),
            _ => Err(AppError::Forbidden("Access denied".to_string())),
        }
    }
}

/// A bearer credential, classified but not yet resolved to a user.
#[derive(Debug, Clone)]
pub enum BearerCredential {
    /// A verified admin session token.
    Admin(AdminTokenClaims),
    /// A confirmed session at the OTP identity provider.
    External(OtpUser),
}

/// Authentication service.
///
/// Handles password login for staff and bearer resolution for everyone.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a AdminTokenService,
    otp: &'a OtpProviderClient,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        pool: &'a PgPool,
        tokens: &'a AdminTokenService,
        otp: &'a OtpProviderClient,
    ) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
            otp,
        }
    }

    // =========================================================================
    // Password Login
    // =========================================================================

    /// Login with email and password; staff accounts only.
    ///
    /// Returns the user and a freshly issued admin token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or
    /// the password is wrong, `AuthError::NotStaff` for USER accounts, and
    /// `AuthError::PasswordNotSet` for accounts without a hash.
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;

        let (user, hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.role.is_staff() {
            return Err(AuthError::NotStaff);
        }

        let hash = hash.ok_or(AuthError::PasswordNotSet)?;
        verify_password(password, &hash)?;

        let token = self.tokens.issue(&email, user.role);
        Ok((user, token))
    }

    // =========================================================================
    // Unified Bearer Resolution
    // =========================================================================

    /// Resolve a bearer token to an authenticated user.
    ///
    /// Tries the admin token first; a cryptographically valid admin token
    /// whose subject is missing from storage falls through to the identity
    /// provider rather than hard-failing, which tolerates accounts
    /// provisioned after token issuance. Returns `Ok(None)` when neither
    /// path resolves a user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` or `AuthError::Otp` when a lookup
    /// itself fails (as opposed to merely not matching).
    pub async fn resolve_bearer(&self, token: &str) -> Result<Option<AuthContext>, AuthError> {
        if let Some(claims) = self.tokens.verify(token) {
            let credential = BearerCredential::Admin(claims);
            if let Some(ctx) = self.resolve_credential(&credential).await? {
                return Ok(Some(ctx));
            }
            tracing::debug!("valid admin token with no matching user; trying identity provider");
        }

        if let Some(provider_user) = self.otp.get_user(token).await? {
            let credential = BearerCredential::External(provider_user);
            if let Some(ctx) = self.resolve_credential(&credential).await? {
                return Ok(Some(ctx));
            }
        }

        Ok(None)
    }

    /// Resolve a classified credential against the user table.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn resolve_credential(
        &self,
        credential: &BearerCredential,
    ) -> Result<Option<AuthContext>, AuthError> {
        let user = match credential {
            BearerCredential::Admin(claims) => match Email::parse(&claims.email) {
                Ok(email) => self.users.get_by_email(&email).await?,
                Err(_) => None,
            },
            BearerCredential::External(provider_user) => {
                self.users
                    .get_by_provider_subject(&provider_user.id, provider_user.phone.as_deref())
                    .await?
            }
        };

        Ok(user.map(|user| AuthContext {
            user_id: user.id,
            role: user.role,
            organization_id: user.organization_id,
        }))
    }

    /// Fetch or lazily create the consumer behind an OTP session.
    ///
    /// First successful OTP login creates the user as a plain USER keyed by
    /// their verified phone number.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the provider has no
    /// phone for the session and no user matches the subject.
    pub async fn get_or_create_consumer(
        &self,
        provider_user: &OtpUser,
    ) -> Result<User, AuthError> {
        if let Some(user) = self
            .users
            .get_by_provider_subject(&provider_user.id, provider_user.phone.as_deref())
            .await?
        {
            return Ok(user);
        }

        let Some(phone) = provider_user.phone.as_deref() else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = self.users.create_consumer(phone).await?;
        tracing::info!(user_id = %user.id, "provisioned consumer on first OTP login");
        Ok(user)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the password does not match.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ctx(role: Role, org: Option<OrganizationId>) -> AuthContext {
        AuthContext {
            user_id: UserId::generate(),
            role,
            organization_id: org,
        }
    }

    #[test]
    fn test_org_filter_superadmin_unscoped() {
        let org = OrganizationId::generate();
        assert_eq!(ctx(Role::Superadmin, Some(org)).org_filter(), None);
        assert_eq!(ctx(Role::Superadmin, None).org_filter(), None);
    }

    #[test]
    fn test_org_filter_admin_scoped() {
        let org = OrganizationId::generate();
        assert_eq!(ctx(Role::Admin, Some(org)).org_filter(), Some(org));
    }

    #[test]
    fn test_ensure_can_mutate_own_org() {
        let org = OrganizationId::generate();
        assert!(ctx(Role::Admin, Some(org)).ensure_can_mutate(Some(org)).is_ok());
    }

    #[test]
    fn test_ensure_can_mutate_other_org_forbidden() {
        let own = OrganizationId::generate();
        let other = OrganizationId::generate();
        let result = ctx(Role::Admin, Some(own)).ensure_can_mutate(Some(other));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_ensure_can_mutate_unowned_row_forbidden_for_admin() {
        // A row with no organization is not an admin's to touch
        let own = OrganizationId::generate();
        assert!(ctx(Role::Admin, Some(own)).ensure_can_mutate(None).is_err());
    }

    #[test]
    fn test_ensure_can_mutate_superadmin_exempt() {
        let other = OrganizationId::generate();
        assert!(ctx(Role::Superadmin, None).ensure_can_mutate(Some(other)).is_ok());
        assert!(ctx(Role::Superadmin, None).ensure_can_mutate(None).is_ok());
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_bad_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
