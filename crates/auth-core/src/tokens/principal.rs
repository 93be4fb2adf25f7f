//! Authenticated principal and the context handed to claim contributors.

use crate::errors::PrincipalViolation;
use crate::tokens::claims::{REFRESH_TOKEN_SCOPE, SCOPE_SEPARATOR};
use serde::{Deserialize, Serialize};

/// An authenticated identity with its granted authorities.
///
/// Construction never fails. Issuance checks the preconditions, because
/// access and refresh tokens require different ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    username: String,
    authorities: Vec<String>,
}

impl Principal {
    /// Authorities keep their first-occurrence order; duplicates are dropped.
    pub fn new<I, S>(username: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for authority in authorities {
            let authority = authority.into();
            if !unique.contains(&authority) {
                unique.push(authority);
            }
        }

        Self {
            username: username.into(),
            authorities: unique,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    /// Precondition shared by every token kind.
    pub(crate) fn require_username(&self) -> Result<(), PrincipalViolation> {
        if self.username.is_empty() {
            return Err(PrincipalViolation::EmptyUsername);
        }
        Ok(())
    }

    /// Preconditions for an access token: a username and at least one
    /// well-formed authority.
    pub(crate) fn require_access_grant(&self) -> Result<(), PrincipalViolation> {
        self.require_username()?;

        if self.authorities.is_empty() {
            return Err(PrincipalViolation::NoAuthorities);
        }

        if let Some(bad) = self.authorities.iter().find(|a| {
            a.trim().is_empty() || a.contains(SCOPE_SEPARATOR) || a.as_str() == REFRESH_TOKEN_SCOPE
        }) {
            return Err(PrincipalViolation::MalformedAuthority(bad.clone()));
        }

        Ok(())
    }

    /// The `scopes` claim value for an access token.
    pub(crate) fn joined_authorities(&self) -> String {
        self.authorities.join(&SCOPE_SEPARATOR.to_string())
    }
}

/// What a claim contributor may know about the authentication event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationContext {
    principal_name: Option<String>,
}

impl AuthenticationContext {
    pub fn new(principal_name: Option<String>) -> Self {
        Self { principal_name }
    }

    pub fn for_principal(name: impl Into<String>) -> Self {
        Self {
            principal_name: Some(name.into()),
        }
    }

    /// The principal name, or `None` when absent or empty.
    pub fn principal_name(&self) -> Option<&str> {
        self.principal_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

impl From<&Principal> for AuthenticationContext {
    fn from(principal: &Principal) -> Self {
        Self::for_principal(principal.username())
    }
}
