//! Shared-password session tokens and the admin cookie.
//!
//! The session token is never stored: it is `sha256(ADMIN_PASSWORD)` in
//! lowercase hex, recomputed for every check. Any client presenting the
//! digest is treated as a moderator.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

use super::state::AdminConfig;

pub const ADMIN_COOKIE_NAME: &str = "insightsetter_admin";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("ADMIN_PASSWORD is not configured. Set it before establishing a session.")]
    SecretMissing,
    #[error("invalid session cookie: {0}")]
    InvalidCookie(#[from] InvalidHeaderValue),
}

/// Hex-encoded SHA-256 of the secret, `None` for an empty secret.
#[must_use]
pub fn derive_token(secret: &str) -> Option<String> {
    if secret.is_empty() {
        return None;
    }
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    Some(hex::encode(hasher.finalize()))
}

/// Constant-time byte comparison.
///
/// Lengths are public (digests are fixed size), so a length mismatch returns
/// early. Equal-length inputs are compared with `subtle::ConstantTimeEq`.
#[must_use]
pub fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len() && bool::from(left.ct_eq(right))
}

/// Read the admin session cookie from the request headers.
///
/// Returns the raw value, which may be empty (`insightsetter_admin=`).
#[must_use]
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == ADMIN_COOKIE_NAME).then(|| val.trim().to_string())
        })
}

/// Validates admin sessions against the configured shared secret.
#[derive(Debug)]
pub struct AdminAuthenticator {
    secret: Option<SecretString>,
    config: AdminConfig,
}

impl AdminAuthenticator {
    /// Surrounding whitespace is trimmed; an empty secret leaves admin access disabled.
    #[must_use]
    pub fn new(secret: Option<SecretString>, config: AdminConfig) -> Self {
        let secret = secret
            .map(|secret| secret.expose_secret().trim().to_string())
            .filter(|secret| !secret.is_empty())
            .map(SecretString::from);

        Self { secret, config }
    }

    #[must_use]
    pub const fn config(&self) -> &AdminConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// The token every valid session cookie carries, if a secret is configured.
    #[must_use]
    pub fn session_token(&self) -> Option<String> {
        self.secret
            .as_ref()
            .and_then(|secret| derive_token(secret.expose_secret()))
    }

    /// Check a submitted password. Case-sensitive and untrimmed.
    #[must_use]
    pub fn verify_password(&self, candidate: &str) -> bool {
        let Some(expected) = self.session_token() else {
            return false;
        };
        let Some(candidate) = derive_token(candidate) else {
            return false;
        };
        constant_time_eq(candidate.as_bytes(), expected.as_bytes())
    }

    /// Compare a presented cookie value with the expected token.
    #[must_use]
    pub fn is_valid_token(&self, presented: &str) -> bool {
        self.session_token()
            .is_some_and(|expected| constant_time_eq(presented.as_bytes(), expected.as_bytes()))
    }

    #[must_use]
    pub fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        session_cookie(headers).is_some_and(|token| self.is_valid_token(&token))
    }

    /// Build the `Set-Cookie` value that starts a session.
    ///
    /// # Errors
    /// Returns [`SessionError::SecretMissing`] when no secret is configured.
    pub fn establish_session(&self) -> Result<HeaderValue, SessionError> {
        let token = self.session_token().ok_or(SessionError::SecretMissing)?;
        let ttl_seconds = self.config.session_ttl_seconds();
        let mut cookie = format!(
            "{ADMIN_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
        );
        if self.config.cookie_secure() {
            cookie.push_str("; Secure");
        }
        Ok(HeaderValue::from_str(&cookie)?)
    }

    /// Build the `Set-Cookie` value that deletes the session cookie.
    ///
    /// # Errors
    /// Returns an error if the cookie cannot be encoded as a header value.
    pub fn clear_session(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut cookie = format!("{ADMIN_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.config.cookie_secure() {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HUNTER2_TOKEN: &str = "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7";

    fn authenticator(secret: &str) -> AdminAuthenticator {
        AdminAuthenticator::new(Some(SecretString::from(secret.to_string())), AdminConfig::new())
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(value) {
            headers.insert(COOKIE, value);
        }
        headers
    }

    #[test]
    fn derive_token_is_sha256_hex() {
        assert_eq!(derive_token("hunter2").as_deref(), Some(HUNTER2_TOKEN));
        assert_eq!(derive_token("hunter2"), derive_token("hunter2"));
    }

    #[test]
    fn derive_token_distinguishes_secrets() {
        assert_ne!(derive_token("a"), derive_token("b"));
        assert_ne!(derive_token("hunter2"), derive_token("Hunter2"));
    }

    #[test]
    fn derive_token_rejects_empty_secret() {
        assert_eq!(derive_token(""), None);
    }

    #[test]
    fn constant_time_eq_matches_equality() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(constant_time_eq(b"", b""));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hellO"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }

    #[test]
    fn constant_time_eq_on_session_digests() {
        let token = HUNTER2_TOKEN.as_bytes();
        let mut last_byte = token.to_vec();
        if let Some(byte) = last_byte.last_mut() {
            *byte = if *byte == b'0' { b'1' } else { b'0' };
        }
        assert!(constant_time_eq(token, token));
        assert!(!constant_time_eq(token, &last_byte));
        assert!(!constant_time_eq(token, &token[..token.len() - 1]));
        assert!(!constant_time_eq(&token[..token.len() - 1], token));
    }

    #[test]
    fn verify_password_is_case_sensitive() {
        let auth = authenticator("hunter2");
        assert!(auth.verify_password("hunter2"));
        assert!(!auth.verify_password("Hunter2"));
        assert!(!auth.verify_password(" hunter2"));
        assert!(!auth.verify_password(""));
    }

    #[test]
    fn verify_password_without_secret_is_false() {
        let auth = AdminAuthenticator::new(None, AdminConfig::new());
        assert!(!auth.is_configured());
        assert!(!auth.verify_password(""));
        assert!(!auth.verify_password("hunter2"));
    }

    #[test]
    fn blank_secret_counts_as_unconfigured() {
        let auth = authenticator("   ");
        assert!(!auth.is_configured());
        assert_eq!(auth.session_token(), None);
    }

    #[test]
    fn configured_secret_is_trimmed() {
        let auth = authenticator("  hunter2\n");
        assert_eq!(auth.session_token().as_deref(), Some(HUNTER2_TOKEN));
        assert!(auth.verify_password("hunter2"));
    }

    #[test]
    fn is_authenticated_requires_exact_token() {
        let auth = authenticator("hunter2");
        assert!(!auth.is_authenticated(&HeaderMap::new()));
        assert!(auth.is_authenticated(&cookie_headers(&format!(
            "{ADMIN_COOKIE_NAME}={HUNTER2_TOKEN}"
        ))));
        assert!(!auth.is_authenticated(&cookie_headers(&format!(
            "{ADMIN_COOKIE_NAME}={}",
            HUNTER2_TOKEN.to_uppercase()
        ))));
        assert!(!auth.is_authenticated(&cookie_headers(&format!(
            "{ADMIN_COOKIE_NAME}={}",
            &HUNTER2_TOKEN[..63]
        ))));
        assert!(!auth.is_authenticated(&cookie_headers(&format!(
            "other={HUNTER2_TOKEN}"
        ))));
    }

    #[test]
    fn is_authenticated_false_without_secret() {
        let auth = AdminAuthenticator::new(None, AdminConfig::new());
        assert!(!auth.is_authenticated(&cookie_headers(&format!(
            "{ADMIN_COOKIE_NAME}={HUNTER2_TOKEN}"
        ))));
        assert!(!auth.is_authenticated(&cookie_headers(&format!("{ADMIN_COOKIE_NAME}="))));
    }

    #[test]
    fn rotating_secret_invalidates_cookie() {
        let issued = authenticator("a").session_token().unwrap_or_default();
        let headers = cookie_headers(&format!("{ADMIN_COOKIE_NAME}={issued}"));
        assert!(authenticator("a").is_authenticated(&headers));
        assert!(!authenticator("b").is_authenticated(&headers));
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        let headers = cookie_headers(&format!(
            "theme=dark; {ADMIN_COOKIE_NAME}={HUNTER2_TOKEN}; other=1"
        ));
        assert_eq!(session_cookie(&headers).as_deref(), Some(HUNTER2_TOKEN));
        assert_eq!(
            session_cookie(&cookie_headers(&format!("{ADMIN_COOKIE_NAME}="))).as_deref(),
            Some("")
        );
        assert_eq!(session_cookie(&cookie_headers("theme=dark")), None);
    }

    #[test]
    fn establish_session_sets_cookie_attributes() -> Result<(), SessionError> {
        let cookie = authenticator("hunter2").establish_session()?;
        assert_eq!(
            cookie.to_str().unwrap_or_default(),
            format!(
                "{ADMIN_COOKIE_NAME}={HUNTER2_TOKEN}; Path=/; HttpOnly; SameSite=Lax; Max-Age=43200"
            )
        );
        Ok(())
    }

    #[test]
    fn establish_session_marks_secure_cookie() -> Result<(), SessionError> {
        let auth = AdminAuthenticator::new(
            Some(SecretString::from("hunter2".to_string())),
            AdminConfig::new().with_cookie_secure(true),
        );
        let cookie = auth.establish_session()?;
        assert!(cookie.to_str().unwrap_or_default().ends_with("; Secure"));
        Ok(())
    }

    #[test]
    fn establish_session_fails_without_secret() {
        let auth = AdminAuthenticator::new(None, AdminConfig::new());
        assert!(matches!(
            auth.establish_session(),
            Err(SessionError::SecretMissing)
        ));
    }

    #[test]
    fn clear_session_expires_cookie() -> Result<(), InvalidHeaderValue> {
        let cookie = authenticator("hunter2").clear_session()?;
        assert_eq!(
            cookie.to_str().unwrap_or_default(),
            format!("{ADMIN_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
        );
        Ok(())
    }
}
