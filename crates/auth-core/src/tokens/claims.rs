//! JWT claims carried by access and refresh tokens.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Marker scope carried by every refresh token.
///
/// A principal authority may never equal this value, so an access token can
/// never be mistaken for a refresh token.
pub const REFRESH_TOKEN_SCOPE: &str = "ROLE_REFRESH_TOKEN";

/// Separator between authorities in the `scopes` claim.
pub const SCOPE_SEPARATOR: char = ',';

/// Claim names owned by the issuer. Additional claims may not use them.
pub const RESERVED_CLAIMS: &[&str] = &["sub", "scopes", "iss", "iat", "exp", "jti", "aud", "nbf"];

/// Additional, non-security-critical claims merged into the payload.
///
/// A `BTreeMap` keeps the serialised payload deterministic.
pub type AdditionalClaims = BTreeMap<String, Value>;

/// Whether `name` is owned by the issuer.
#[must_use]
pub fn is_reserved_claim(name: &str) -> bool {
    RESERVED_CLAIMS.contains(&name)
}

/// JWT claims.
///
/// Serialised with the standard JWT names plus `scopes`. Additional claims are
/// flattened into the top level of the payload.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal username)
    pub sub: String,
    /// Comma-joined authorities, in principal order
    pub scopes: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
    /// Token id, present on refresh tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(flatten)]
    pub additional: AdditionalClaims,
}

impl std::fmt::Debug for Claims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("scopes", &self.scopes)
            .field("iss", &self.iss)
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .field("jti", &self.jti.as_ref().map(|_| "[REDACTED]"))
            .field("additional", &self.additional.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Claims {
    /// Authorities in the order they were joined.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scopes
            .split(SCOPE_SEPARATOR)
            .filter(|scope| !scope.is_empty())
    }

    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes().any(|s| s == scope)
    }

    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.has_scope(REFRESH_TOKEN_SCOPE)
    }

    /// Look up an additional claim by name.
    #[must_use]
    pub fn additional(&self, name: &str) -> Option<&Value> {
        self.additional.get(name)
    }

    /// Compare the issuer-owned claims, ignoring additional claims.
    #[must_use]
    pub fn base_claims_eq(&self, other: &Claims) -> bool {
        self.sub == other.sub
            && self.scopes == other.scopes
            && self.iss == other.iss
            && self.iat == other.iat
            && self.exp == other.exp
            && self.jti == other.jti
    }

    /// Copy of these claims without any additional claims.
    #[must_use]
    pub fn base(&self) -> Claims {
        Claims {
            additional: AdditionalClaims::new(),
            ..self.clone()
        }
    }
}
