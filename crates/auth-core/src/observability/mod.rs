//! Observability for token issuance and validator dispatch
//!
//! # Privacy by Default
//!
//! Crypto entry points use `#[instrument(skip_all)]` and log an explicit
//! allow-list of fields. Fields are categorized as:
//! - **SAFE**: Can be logged in plaintext (token kind, outcome, validator key)
//! - **HASHED**: Must be SHA-256 hashed for correlation (subject / username)
//! - **NEVER**: Must never appear in logs (signing secret, encoded tokens, jti)

pub mod metrics;

pub use metrics::{
    record_token_enhancement, record_token_issuance, record_token_validation,
    record_validator_check,
};

use crate::errors::AuthError;
use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// Used for subjects, which need correlation across log entries but should
/// not be stored in plaintext. This is a correlation aid, not a secret hash.
pub fn hash_for_correlation(value: &str) -> String {
    let result = Sha256::digest(value.as_bytes());
    // First 4 bytes = 8 hex chars
    hex::encode(result.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller-supplied input failed a precondition
    Precondition,
    /// Deployment wiring problem (e.g. a contributor using a reserved claim)
    Configuration,
    /// Signing or verification failure
    Cryptographic,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Precondition => "precondition",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Cryptographic => "cryptographic",
        }
    }
}

impl From<&AuthError> for ErrorCategory {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::InvalidPrincipal(_) | AuthError::MissingPrincipalContext => {
                ErrorCategory::Precondition
            }
            AuthError::ReservedClaim(_) => ErrorCategory::Configuration,
            AuthError::Crypto(_) | AuthError::InvalidToken(_) => ErrorCategory::Cryptographic,
        }
    }
}
