//! Builder patterns for test data construction
//!
//! Provides fluent APIs for principals and for raw, hand-signed tokens that
//! the factory would never issue (expired, foreign issuer, wrong secret).

use crate::test_ids::*;
use auth_core::tokens::Principal;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Map, Value};

/// Builder for test principals
///
/// # Example
/// ```rust,ignore
/// let principal = TestPrincipalBuilder::new()
///     .for_user("alice")
///     .with_authority("ROLE_USER")
///     .build();
/// ```
pub struct TestPrincipalBuilder {
    username: String,
    authorities: Vec<String>,
}

impl TestPrincipalBuilder {
    /// `alice` with no authorities
    pub fn new() -> Self {
        Self {
            username: TEST_USER_ALICE.to_string(),
            authorities: Vec::new(),
        }
    }

    pub fn for_user(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    pub fn with_authority(mut self, authority: &str) -> Self {
        self.authorities.push(authority.to_string());
        self
    }

    pub fn with_authorities(mut self, authorities: &[&str]) -> Self {
        self.authorities
            .extend(authorities.iter().map(|a| (*a).to_string()));
        self
    }

    pub fn build(self) -> Principal {
        Principal::new(self.username, self.authorities)
    }
}

impl Default for TestPrincipalBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for raw JWT claims, signed directly with `jsonwebtoken`
///
/// # Example
/// ```rust,ignore
/// let expired = TestClaimsBuilder::new()
///     .for_user("alice")
///     .expires_in(-60)
///     .sign(TEST_SIGNING_SECRET);
/// ```
pub struct TestClaimsBuilder {
    claims: Map<String, Value>,
    algorithm: Algorithm,
}

impl TestClaimsBuilder {
    /// Valid-looking access token claims for `alice`, expiring in 15 minutes
    pub fn new() -> Self {
        let now = Utc::now();
        let mut claims = Map::new();
        claims.insert("sub".to_string(), json!(TEST_USER_ALICE));
        claims.insert("scopes".to_string(), json!(ROLE_USER));
        claims.insert("iss".to_string(), json!(TEST_ISSUER));
        claims.insert("iat".to_string(), json!(now.timestamp()));
        claims.insert(
            "exp".to_string(),
            json!((now + Duration::minutes(15)).timestamp()),
        );

        Self {
            claims,
            algorithm: Algorithm::HS512,
        }
    }

    pub fn for_user(self, subject: &str) -> Self {
        self.with_claim("sub", json!(subject))
    }

    /// Set the comma-joined `scopes` claim
    pub fn with_scopes(self, scopes: &str) -> Self {
        self.with_claim("scopes", json!(scopes))
    }

    pub fn issued_by(self, issuer: &str) -> Self {
        self.with_claim("iss", json!(issuer))
    }

    /// Set expiration in seconds from now (negative for an expired token)
    pub fn expires_in(self, seconds: i64) -> Self {
        let exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self.with_claim("exp", json!(exp))
    }

    /// Set issued-at timestamp
    pub fn issued_at(self, timestamp: i64) -> Self {
        self.with_claim("iat", json!(timestamp))
    }

    pub fn with_jti(self, jti: &str) -> Self {
        self.with_claim("jti", json!(jti))
    }

    pub fn with_claim(mut self, name: &str, value: Value) -> Self {
        self.claims.insert(name.to_string(), value);
        self
    }

    pub fn without_claim(mut self, name: &str) -> Self {
        self.claims.remove(name);
        self
    }

    /// Sign with another HMAC algorithm (e.g. HS256)
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Build the claims as a JSON value
    pub fn build(self) -> Value {
        Value::Object(self.claims)
    }

    /// Sign the claims with `secret` and return the compact token
    pub fn sign(self, secret: &str) -> String {
        let header = Header::new(self.algorithm);
        encode(
            &header,
            &Value::Object(self.claims),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to sign test claims")
    }
}

impl Default for TestClaimsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
