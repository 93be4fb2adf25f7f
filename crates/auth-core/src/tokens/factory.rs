//! Access and refresh token issuance.

use crate::config::TokenSettings;
use crate::crypto::{generate_token_id, TokenSigner};
use crate::errors::AuthError;
use crate::observability::{
    hash_for_correlation, record_token_issuance, record_token_validation, ErrorCategory,
};
use crate::tokens::builder::TokenBuilder;
use crate::tokens::claims::{AdditionalClaims, Claims, REFRESH_TOKEN_SCOPE};
use crate::tokens::principal::Principal;
use crate::tokens::{Token, TokenKind, TokenPair};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;

/// Generic message for tokens presented for the wrong use.
const INVALID_TOKEN: &str = "The token is invalid or expired";

/// Issues and verifies tokens for one issuer and signing secret.
///
/// Holds no mutable state. Cloning is cheap and clones share the signer.
#[derive(Debug, Clone)]
pub struct TokenFactory {
    settings: Arc<TokenSettings>,
    signer: Arc<TokenSigner>,
}

impl TokenFactory {
    /// Settings are validated when built, so a factory always starts from a
    /// usable issuer, secret and lifetimes.
    pub fn new(settings: TokenSettings) -> Self {
        let signer = Arc::new(TokenSigner::new(&settings));
        Self {
            settings: Arc::new(settings),
            signer,
        }
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Shared signer, for re-signing enhanced tokens.
    pub fn signer(&self) -> Arc<TokenSigner> {
        Arc::clone(&self.signer)
    }

    /// Issue a short-lived access token carrying every authority of `principal`.
    ///
    /// # Errors
    ///
    /// - `InvalidPrincipal(EmptyUsername)` - empty username
    /// - `InvalidPrincipal(NoAuthorities)` - no authorities granted
    /// - `InvalidPrincipal(MalformedAuthority)` - an authority cannot be
    ///   represented in the `scopes` claim
    /// - `Crypto` - signing failed
    #[instrument(skip_all)]
    pub fn create_access_token(&self, principal: &Principal) -> Result<Token, AuthError> {
        let start = Instant::now();
        let result = self
            .access_token_builder(principal)
            .and_then(TokenBuilder::sign);
        observe_issuance(TokenKind::Access, principal, &result, start);
        result
    }

    /// Unsigned access token claims, for callers that add claims before signing.
    pub fn access_token_builder(&self, principal: &Principal) -> Result<TokenBuilder, AuthError> {
        principal
            .require_access_grant()
            .map_err(AuthError::InvalidPrincipal)?;

        let claims = self.base_claims(
            principal,
            principal.joined_authorities(),
            self.settings.access_token_lifetime(),
            None,
        );
        Ok(TokenBuilder::new(claims, self.signer()))
    }

    /// Issue a long-lived refresh token with a fresh random `jti`.
    ///
    /// Only the username is required; authorities are not carried.
    ///
    /// # Errors
    ///
    /// - `InvalidPrincipal(EmptyUsername)` - empty username
    /// - `Crypto` - signing failed
    #[instrument(skip_all)]
    pub fn create_refresh_token(&self, principal: &Principal) -> Result<Token, AuthError> {
        let start = Instant::now();
        let result = principal
            .require_username()
            .map_err(AuthError::InvalidPrincipal)
            .and_then(|()| {
                let claims = self.base_claims(
                    principal,
                    REFRESH_TOKEN_SCOPE.to_string(),
                    self.settings.refresh_token_lifetime(),
                    Some(generate_token_id()),
                );
                TokenBuilder::new(claims, self.signer()).sign()
            });
        observe_issuance(TokenKind::Refresh, principal, &result, start);
        result
    }

    /// Issue an access token and a refresh token for the same principal.
    pub fn issue_token_pair(&self, principal: &Principal) -> Result<TokenPair, AuthError> {
        let access = self.create_access_token(principal)?;
        let refresh = self.create_refresh_token(principal)?;
        Ok(TokenPair { access, refresh })
    }

    /// Verify a token of either kind.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        observe_validation(self.signer.verify(token))
    }

    /// Verify a token and require that it was issued for access.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        observe_validation(self.signer.verify(token).and_then(|claims| {
            if claims.is_refresh_token()
                || claims.jti.is_some()
                || claims.scopes().next().is_none()
            {
                tracing::debug!(target: "auth.tokens", "Token rejected: not an access token");
                return Err(invalid_token());
            }
            Ok(claims)
        }))
    }

    /// Verify a token and require that it was issued for refresh.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        observe_validation(self.signer.verify(token).and_then(|claims| {
            if claims.scopes != REFRESH_TOKEN_SCOPE || claims.jti.is_none() {
                tracing::debug!(target: "auth.tokens", "Token rejected: not a refresh token");
                return Err(invalid_token());
            }
            Ok(claims)
        }))
    }

    /// Exchange a refresh token for a new pair. The refresh token is rotated.
    ///
    /// `principal` carries the current authorities; its username must match the
    /// refresh token subject.
    #[instrument(skip_all)]
    pub fn refresh(
        &self,
        refresh_token: &str,
        principal: &Principal,
    ) -> Result<TokenPair, AuthError> {
        let claims = self.verify_refresh_token(refresh_token)?;

        if claims.sub != principal.username() {
            tracing::debug!(
                target: "auth.tokens",
                token_subject = %hash_for_correlation(&claims.sub),
                principal = %hash_for_correlation(principal.username()),
                "Refresh rejected: subject does not match principal"
            );
            return Err(invalid_token());
        }

        self.issue_token_pair(principal)
    }

    fn base_claims(
        &self,
        principal: &Principal,
        scopes: String,
        lifetime: Duration,
        jti: Option<String>,
    ) -> Claims {
        let iat = chrono::Utc::now().timestamp();
        let lifetime_secs = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);

        Claims {
            sub: principal.username().to_string(),
            scopes,
            iss: self.settings.issuer().to_string(),
            iat,
            exp: iat.saturating_add(lifetime_secs),
            jti,
            additional: AdditionalClaims::new(),
        }
    }
}

fn invalid_token() -> AuthError {
    AuthError::InvalidToken(INVALID_TOKEN.to_string())
}

fn observe_issuance(
    kind: TokenKind,
    principal: &Principal,
    result: &Result<Token, AuthError>,
    start: Instant,
) {
    let subject = hash_for_correlation(principal.username());
    match result {
        Ok(_) => {
            record_token_issuance(kind.as_str(), "success", start.elapsed());
            tracing::debug!(
                target: "auth.tokens",
                kind = %kind,
                subject = %subject,
                "Token issued"
            );
        }
        Err(e) => {
            record_token_issuance(kind.as_str(), "error", start.elapsed());
            tracing::debug!(
                target: "auth.tokens",
                kind = %kind,
                subject = %subject,
                error_category = ErrorCategory::from(e).as_str(),
                error = %e,
                "Token issuance rejected"
            );
        }
    }
}

fn observe_validation(result: Result<Claims, AuthError>) -> Result<Claims, AuthError> {
    match &result {
        Ok(_) => record_token_validation("success", None),
        Err(e) => record_token_validation("error", Some(ErrorCategory::from(e).as_str())),
    }
    result
}
