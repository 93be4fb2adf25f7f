//! Unsigned claims waiting for their single signing step.

use crate::crypto::TokenSigner;
use crate::errors::AuthError;
use crate::tokens::claims::{is_reserved_claim, AdditionalClaims, Claims};
use crate::tokens::Token;
use serde_json::Value;
use std::sync::Arc;

/// Collects additional claims on top of issuer-owned base claims, then signs once.
///
/// Base claims cannot be changed through the builder; [`TokenBuilder::claim`]
/// refuses any reserved name.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    claims: Claims,
    signer: Arc<TokenSigner>,
}

impl TokenBuilder {
    pub(crate) fn new(claims: Claims, signer: Arc<TokenSigner>) -> Self {
        Self { claims, signer }
    }

    /// Re-open an issued token for re-signing. Additional claims it already
    /// carries are kept.
    pub fn from_token(token: &Token, signer: Arc<TokenSigner>) -> Self {
        Self::new(token.claims().clone(), signer)
    }

    /// Add one additional claim. A later value for the same name replaces the earlier one.
    pub fn claim(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self, AuthError> {
        let name = name.into();
        if is_reserved_claim(&name) {
            return Err(AuthError::ReservedClaim(name));
        }

        if self.claims.additional.insert(name.clone(), value.into()).is_some() {
            tracing::debug!(target: "auth.tokens", claim = %name, "Additional claim replaced");
        }
        Ok(self)
    }

    /// Merge a set of additional claims.
    pub fn claims(self, additional: &AdditionalClaims) -> Result<Self, AuthError> {
        additional
            .iter()
            .try_fold(self, |builder, (name, value)| builder.claim(name.clone(), value.clone()))
    }

    /// Issuer-owned claims, without any additional claims.
    pub fn base_claims(&self) -> Claims {
        self.claims.base()
    }

    pub fn additional_claims(&self) -> &AdditionalClaims {
        &self.claims.additional
    }

    /// Sign the collected claims.
    pub fn sign(self) -> Result<Token, AuthError> {
        let encoded = self.signer.sign(&self.claims)?;
        Ok(Token::new(encoded, self.claims))
    }
}
