//! Contextual claims added to issued tokens.
//!
//! Enhancement never touches issuer-owned claims. The token is re-signed with
//! the same base claims plus whatever the contributors add.

use crate::crypto::TokenSigner;
use crate::errors::AuthError;
use crate::observability::{record_token_enhancement, ErrorCategory};
use crate::tokens::builder::TokenBuilder;
use crate::tokens::claims::AdditionalClaims;
use crate::tokens::factory::TokenFactory;
use crate::tokens::principal::AuthenticationContext;
use crate::tokens::Token;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Name of the claim added by [`OrganizationClaim`].
pub const ORGANIZATION_CLAIM: &str = "organization";

/// Source of additional claims for a token.
pub trait ClaimContributor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Add claims derived from `context` to `claims`.
    fn contribute(
        &self,
        context: &AuthenticationContext,
        claims: &mut AdditionalClaims,
    ) -> Result<(), AuthError>;
}

/// Sets `organization` to the principal name.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrganizationClaim;

impl ClaimContributor for OrganizationClaim {
    fn name(&self) -> &'static str {
        ORGANIZATION_CLAIM
    }

    fn contribute(
        &self,
        context: &AuthenticationContext,
        claims: &mut AdditionalClaims,
    ) -> Result<(), AuthError> {
        let name = context
            .principal_name()
            .ok_or(AuthError::MissingPrincipalContext)?;
        claims.insert(ORGANIZATION_CLAIM.to_string(), Value::from(name));
        Ok(())
    }
}

/// Re-signs tokens with claims from an ordered list of contributors.
#[derive(Clone)]
pub struct TokenEnhancer {
    signer: Arc<TokenSigner>,
    contributors: Vec<Arc<dyn ClaimContributor>>,
}

impl std::fmt::Debug for TokenEnhancer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEnhancer")
            .field(
                "contributors",
                &self.contributors.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl TokenEnhancer {
    /// Enhancer signing with `factory`'s secret, with [`OrganizationClaim`] installed.
    pub fn new(factory: &TokenFactory) -> Self {
        Self {
            signer: factory.signer(),
            contributors: vec![Arc::new(OrganizationClaim)],
        }
    }

    /// Append a contributor. Contributors run in insertion order; a later one
    /// may replace a claim set by an earlier one.
    #[must_use]
    pub fn with_contributor(mut self, contributor: impl ClaimContributor + 'static) -> Self {
        self.contributors.push(Arc::new(contributor));
        self
    }

    /// Produce a new token with the same base claims plus contributed claims.
    ///
    /// # Errors
    ///
    /// - `MissingPrincipalContext` - `context` has no principal name
    /// - `ReservedClaim` - a contributor tried to set an issuer-owned claim
    /// - `Crypto` - re-signing failed
    #[instrument(skip_all)]
    pub fn enhance(
        &self,
        token: &Token,
        context: &AuthenticationContext,
    ) -> Result<Token, AuthError> {
        self.enhance_builder(
            TokenBuilder::from_token(token, Arc::clone(&self.signer)),
            context,
        )
    }

    /// Add contributed claims to an unsigned builder and sign it once.
    pub fn enhance_builder(
        &self,
        builder: TokenBuilder,
        context: &AuthenticationContext,
    ) -> Result<Token, AuthError> {
        let result = self.apply(builder, context);

        match &result {
            Ok(token) => {
                record_token_enhancement("success");
                tracing::debug!(
                    target: "auth.tokens",
                    kind = %token.kind(),
                    added = token.claims().additional.len(),
                    "Token enhanced"
                );
            }
            Err(e) => {
                record_token_enhancement("error");
                tracing::debug!(
                    target: "auth.tokens",
                    error_category = ErrorCategory::from(e).as_str(),
                    error = %e,
                    "Token enhancement failed"
                );
            }
        }

        result
    }

    fn apply(
        &self,
        builder: TokenBuilder,
        context: &AuthenticationContext,
    ) -> Result<Token, AuthError> {
        if context.principal_name().is_none() {
            return Err(AuthError::MissingPrincipalContext);
        }

        let mut additional = AdditionalClaims::new();
        for contributor in &self.contributors {
            contributor.contribute(context, &mut additional)?;
        }

        builder.claims(&additional)?.sign()
    }
}
