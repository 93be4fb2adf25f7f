//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions over compact token strings. Only the
//! structure and payload are inspected; signatures are checked by the
//! factory under test.

use auth_core::tokens::REFRESH_TOKEN_SCOPE;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use serde_json::Value;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

fn decode_part(token: &str, index: usize, what: &str) -> Vec<u8> {
    let part = token
        .split('.')
        .nth(index)
        .unwrap_or_else(|| panic!("JWT has no {what} part"));
    URL_SAFE_NO_PAD
        .decode(part)
        .unwrap_or_else(|e| panic!("Failed to base64 decode JWT {what}: {e}"))
}

fn payload(token: &str) -> Value {
    serde_json::from_slice(&decode_part(token, 1, "payload")).expect("Failed to parse JWT claims")
}

fn scopes(payload: &Value) -> Vec<String> {
    payload["scopes"]
        .as_str()
        .expect("JWT has no scopes claim")
        .split(',')
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Custom assertions for compact tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .as_str()
///     .assert_valid_jwt()
///     .assert_has_scope("ROLE_USER")
///     .assert_has_claim("organization", &json!("alice"));
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a three-part HS512 JWT with the required claims
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the comma-joined scopes contain the specified scope
    fn assert_has_scope(&self, scope: &str) -> &Self;

    /// Assert that the scopes are exactly these, in order
    fn assert_scopes(&self, expected: &[&str]) -> &Self;

    /// Assert that the token expires within the specified seconds
    fn assert_expires_in(&self, seconds: u64) -> &Self;

    /// Assert that the token is for the specified subject
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert that the token was issued by the specified issuer
    fn assert_issued_by(&self, issuer: &str) -> &Self;

    /// Assert that an additional claim has the specified value
    fn assert_has_claim(&self, name: &str, value: &Value) -> &Self;

    /// Assert that a claim is absent
    fn assert_lacks_claim(&self, name: &str) -> &Self;

    /// Assert that the token carries the refresh marker and a `jti`
    fn assert_refresh_token(&self) -> &Self;
}

impl TokenAssertions for str {
    fn assert_valid_jwt(&self) -> &Self {
        let parts = self.split('.').count();
        assert_eq!(
            parts, 3,
            "JWT must have 3 parts (header.payload.signature), got {parts}"
        );

        let header: JwtHeader = serde_json::from_slice(&decode_part(self, 0, "header"))
            .expect("Failed to parse JWT header JSON");
        assert_eq!(header.alg, "HS512", "Expected HS512 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        let claims = payload(self);
        for name in ["sub", "scopes", "iss", "iat", "exp"] {
            assert!(claims.get(name).is_some(), "JWT is missing claim '{name}'");
        }
        assert!(
            claims["exp"].as_i64() > claims["iat"].as_i64(),
            "JWT exp must be after iat: {claims}"
        );

        self
    }

    fn assert_has_scope(&self, scope: &str) -> &Self {
        let claims = payload(self);
        let scopes = scopes(&claims);
        assert!(
            scopes.iter().any(|s| s == scope),
            "Token does not contain scope '{}'. Available scopes: {}",
            scope,
            claims["scopes"]
        );

        self
    }

    fn assert_scopes(&self, expected: &[&str]) -> &Self {
        let scopes = scopes(&payload(self));
        assert_eq!(scopes, expected, "Unexpected scopes");

        self
    }

    fn assert_expires_in(&self, seconds: u64) -> &Self {
        let claims = payload(self);
        let exp = claims["exp"].as_i64().expect("JWT has no exp claim");

        let now = chrono::Utc::now().timestamp();
        let expires_in = exp - now;
        let expected = i64::try_from(seconds).expect("seconds out of range");

        // Allow 5-second tolerance for slow test runs
        assert!(
            (expires_in - expected).abs() <= 5,
            "Expected token to expire in {seconds} seconds, but expires in {expires_in} seconds"
        );

        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = payload(self);
        assert_eq!(
            claims["sub"], subject,
            "Expected subject '{}', got {}",
            subject, claims["sub"]
        );

        self
    }

    fn assert_issued_by(&self, issuer: &str) -> &Self {
        let claims = payload(self);
        assert_eq!(
            claims["iss"], issuer,
            "Expected issuer '{}', got {}",
            issuer, claims["iss"]
        );

        self
    }

    fn assert_has_claim(&self, name: &str, value: &Value) -> &Self {
        let claims = payload(self);
        assert_eq!(
            claims.get(name),
            Some(value),
            "Expected claim '{name}' = {value}, payload: {claims}"
        );

        self
    }

    fn assert_lacks_claim(&self, name: &str) -> &Self {
        let claims = payload(self);
        assert!(
            claims.get(name).is_none(),
            "Expected no claim '{name}', payload: {claims}"
        );

        self
    }

    fn assert_refresh_token(&self) -> &Self {
        let claims = payload(self);
        assert_eq!(
            scopes(&claims),
            [REFRESH_TOKEN_SCOPE],
            "Refresh token must carry only the refresh marker"
        );
        assert!(
            claims["jti"].as_str().is_some_and(|jti| !jti.is_empty()),
            "Refresh token must carry a jti"
        );

        self
    }
}
