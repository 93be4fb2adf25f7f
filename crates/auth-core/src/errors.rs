use thiserror::Error;

/// Errors raised while issuing, enhancing or verifying tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid principal: {0}")]
    InvalidPrincipal(PrincipalViolation),

    #[error("Authentication context does not carry a principal name")]
    MissingPrincipalContext,

    #[error("Claim '{0}' is reserved and cannot be added as an additional claim")]
    ReservedClaim(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Which principal precondition failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrincipalViolation {
    #[error("cannot create a token without a username")]
    EmptyUsername,

    #[error("principal does not have any authorities")]
    NoAuthorities,

    #[error("authority '{0}' is blank, contains ',' or uses the reserved refresh scope")]
    MalformedAuthority(String),
}

/// Failure reported by a validator strategy itself.
///
/// The registry never reinterprets these; they reach the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorFailure {
    #[error("Validator backend unavailable: {0}")]
    Unavailable(String),

    #[error("Validator backend error: {0}")]
    Backend(String),
}

/// Errors raised by the validation registry.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No strategy bound under this key. A deployment bug, not an invalid value.
    #[error("No validator registered under key '{0}'")]
    UnknownValidatorKey(String),

    #[error(transparent)]
    Validator(#[from] ValidatorFailure),
}
