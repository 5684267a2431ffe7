//! Admin session token service.
//!
//! Issues and verifies self-contained bearer tokens for password-
//! authenticated staff sessions, so no server-side session storage is
//! needed. The wire format is
//! `base64(JSON(payload) + "." + hex(HMAC-SHA256(JSON(payload))))` with
//! payload keys `email`, `role`, and `timestamp` (milliseconds since epoch).
//!
//! Verification collapses every failure mode - bad encoding, missing
//! separator, signature mismatch, malformed payload, expiry - into the same
//! `None`. Callers cannot distinguish why a token failed; server-side debug
//! logs can.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use luxe_core::{Email, Role};

/// Token lifetime: 24 hours, in milliseconds.
const TOKEN_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Claims carried by a verified admin token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminTokenClaims {
    /// Email the token was issued to.
    pub email: String,
    /// Role at issuance time. The resolver re-reads the live role from
    /// storage; this value only gates endpoints that never touch storage.
    pub role: Role,
}

/// The signed payload. Field order matters: the serialized form is the
/// exact byte sequence the signature covers.
#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    email: String,
    role: Role,
    timestamp: i64,
}

/// Issues and verifies admin session tokens.
///
/// The signing secret is injected at construction (from [`ServerConfig`]);
/// nothing here reads process environment.
///
/// [`ServerConfig`]: crate::config::ServerConfig
#[derive(Clone)]
pub struct AdminTokenService {
    secret: SecretString,
}

impl AdminTokenService {
    /// Create a token service with the given signing secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Issue a token for the given email and role.
    ///
    /// The payload is timestamped with the current wall clock; the token
    /// expires 24 hours later.
    #[must_use]
    pub fn issue(&self, email: &Email, role: Role) -> String {
        self.issue_at(email, role, Utc::now().timestamp_millis())
    }

    /// Issue a token with an explicit issuance timestamp (for tests).
    #[must_use]
    pub fn issue_at(&self, email: &Email, role: Role, timestamp_ms: i64) -> String {
        let payload = TokenPayload {
            email: email.as_str().to_owned(),
            role,
            timestamp: timestamp_ms,
        };
        // Serialization of a struct with only string/int fields cannot fail
        let serialized =
            serde_json::to_string(&payload).unwrap_or_else(|_| String::from("{}"));

        let signature = self.sign(&serialized);

        BASE64.encode(format!("{serialized}.{signature}"))
    }

    /// Verify a token against the current wall clock.
    ///
    /// Returns `None` for any invalid token, without distinguishing why.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<AdminTokenClaims> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    /// Verify a token against an explicit clock (for tests).
    #[must_use]
    pub fn verify_at(&self, token: &str, now_ms: i64) -> Option<AdminTokenClaims> {
        let decoded = BASE64.decode(token).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;

        // Split on the LAST dot: the payload is JSON and may itself contain
        // dots (e.g. inside an email address).
        let last_dot = decoded.rfind('.')?;
        let (payload, signature) = decoded.split_at(last_dot);
        let signature = signature.get(1..)?;

        let expected = self.sign(payload);
        if !constant_time_compare(signature, &expected) {
            tracing::debug!("admin token signature mismatch");
            return None;
        }

        let payload: TokenPayload = serde_json::from_str(payload).ok()?;

        if now_ms - payload.timestamp > TOKEN_TTL_MS {
            tracing::debug!("admin token expired");
            return None;
        }

        Some(AdminTokenClaims {
            email: payload.email,
            role: payload.role,
        })
    }

    /// Hex HMAC-SHA256 of the serialized payload.
    fn sign(&self, payload: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> AdminTokenService {
        AdminTokenService::new(SecretString::from("test-signing-secret"))
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
        assert!(!constant_time_compare("hello", "helloo"));
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let svc = service();
        for (addr, role) in [
            ("admin@example.com", Role::Admin),
            ("root@example.com", Role::Superadmin),
            ("shopper@example.com", Role::User),
        ] {
            let token = svc.issue(&email(addr), role);
            let claims = svc.verify(&token).expect("token should verify");
            assert_eq!(claims.email, addr);
            assert_eq!(claims.role, role);
        }
    }

    #[test]
    fn test_dotted_email_roundtrip() {
        // The payload contains dots; verification must split on the last one
        let svc = service();
        let token = svc.issue(&email("a.b@example.com"), Role::Admin);
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.email, "a.b@example.com");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_wire_format() {
        let svc = service();
        let token = svc.issue_at(&email("admin@example.com"), Role::Admin, 1_700_000_000_000);

        let decoded = String::from_utf8(BASE64.decode(&token).unwrap()).unwrap();
        let (payload, signature) = decoded.split_at(decoded.rfind('.').unwrap());

        assert_eq!(
            payload,
            r#"{"email":"admin@example.com","role":"ADMIN","timestamp":1700000000000}"#
        );
        // hex-encoded SHA-256 HMAC
        assert_eq!(signature.len(), 1 + 64);
        assert!(signature.get(1..).unwrap().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let svc = service();
        let token = svc.issue(&email("admin@example.com"), Role::Admin);

        let mut decoded = BASE64.decode(&token).unwrap();
        // Flip one byte inside the payload (well before the signature)
        *decoded.get_mut(10).unwrap() ^= 0x01;
        let tampered = BASE64.encode(&decoded);

        assert!(svc.verify(&tampered).is_none());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let svc = service();
        let token = svc.issue(&email("admin@example.com"), Role::Admin);

        let mut decoded = BASE64.decode(&token).unwrap();
        let last = decoded.len() - 1;
        // Flip the final hex digit of the signature
        let byte = decoded.get_mut(last).unwrap();
        *byte = if *byte == b'0' { b'1' } else { b'0' };
        let tampered = BASE64.encode(&decoded);

        assert!(svc.verify(&tampered).is_none());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(&email("admin@example.com"), Role::Admin);
        let other = AdminTokenService::new(SecretString::from("another-secret"));
        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn test_expiry() {
        let svc = service();
        let issued_at = 1_700_000_000_000;
        let token = svc.issue_at(&email("admin@example.com"), Role::Admin, issued_at);

        // Just inside the window
        assert!(svc.verify_at(&token, issued_at + TOKEN_TTL_MS).is_some());
        // Just past it
        assert!(svc.verify_at(&token, issued_at + TOKEN_TTL_MS + 1).is_none());
    }

    #[test]
    fn test_garbage_tokens_rejected() {
        let svc = service();
        assert!(svc.verify("").is_none());
        assert!(svc.verify("not-base64!!!").is_none());
        // Valid base64 but no separator
        assert!(svc.verify(&BASE64.encode("no separator here")).is_none());
        // Valid base64, separator, but not JSON
        assert!(svc.verify(&BASE64.encode("not-json.deadbeef")).is_none());
        // Valid base64 but not UTF-8
        assert!(svc.verify(&BASE64.encode([0xff, 0xfe, b'.', 0x00])).is_none());
    }

    #[test]
    fn test_unknown_role_rejected() {
        // A payload with a role outside the enum is malformed
        let svc = service();
        let payload = r#"{"email":"admin@example.com","role":"OWNER","timestamp":99999999999999}"#;
        let mut mac =
            Hmac::<Sha256>::new_from_slice(b"test-signing-secret").expect("valid key length");
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        let token = BASE64.encode(format!("{payload}.{signature}"));

        assert!(svc.verify(&token).is_none());
    }
}
