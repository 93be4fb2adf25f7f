//! Token issuance, enhancement and verification.
//!
//! A [`Token`] is an immutable pair of the compact signed string and the
//! claims it was produced from. Tokens are only created by signing, so the
//! two always agree.

pub mod builder;
pub mod claims;
pub mod enhancer;
pub mod factory;
pub mod principal;

pub use builder::TokenBuilder;
pub use claims::{AdditionalClaims, Claims, REFRESH_TOKEN_SCOPE, RESERVED_CLAIMS};
pub use enhancer::{ClaimContributor, OrganizationClaim, TokenEnhancer, ORGANIZATION_CLAIM};
pub use factory::TokenFactory;
pub use principal::{AuthenticationContext, Principal};

use common::secret::{ExposeSecret, SecretString};
use std::fmt;

/// Which use a token was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed token. `Debug` never shows the encoded value.
#[derive(Debug, Clone)]
pub struct Token {
    encoded: SecretString,
    claims: Claims,
}

impl Token {
    pub(crate) fn new(encoded: SecretString, claims: Claims) -> Self {
        Self { encoded, claims }
    }

    /// The compact bearer string. Treat it as a credential.
    pub fn as_str(&self) -> &str {
        self.encoded.expose_secret()
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn kind(&self) -> TokenKind {
        if self.claims.is_refresh_token() {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        }
    }
}

/// Access and refresh token issued together for one principal.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: Token,
    pub refresh: Token,
}
