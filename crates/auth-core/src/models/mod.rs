use crate::tokens::TokenPair;
use serde::{Deserialize, Serialize};

/// OAuth2-style token response body.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: u64,
    /// Space-delimited authorities granted to the access token
    pub scope: String,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

impl From<&TokenPair> for TokenResponse {
    fn from(pair: &TokenPair) -> Self {
        let claims = pair.access.claims();
        Self {
            access_token: pair.access.as_str().to_string(),
            refresh_token: pair.refresh.as_str().to_string(),
            token_type: "Bearer".to_string(),
            expires_in: u64::try_from(claims.exp.saturating_sub(claims.iat)).unwrap_or(0),
            scope: claims.scopes().collect::<Vec<_>>().join(" "),
        }
    }
}
