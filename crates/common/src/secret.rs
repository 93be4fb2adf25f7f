//! Secret types for protecting signing material and bearer tokens from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Two kinds of values in this
//! workspace must always travel wrapped:
//!
//! - the HMAC signing secret held by the token settings, and
//! - every encoded (signed) token string, because a bearer token is a credential.
//!
//! `SecretString` implements `Debug` with redaction, so deriving `Debug` on a struct that
//! contains one is safe for `{:?}` and for `tracing` fields.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct IssuedToken {
//!     subject: String,
//!     encoded: SecretString,
//! }
//!
//! let token = IssuedToken {
//!     subject: "alice".to_string(),
//!     encoded: SecretString::from("eyJhbGciOiJIUzUxMiJ9.e30.c2ln"),
//! };
//!
//! // The encoded token is redacted
//! assert!(!format!("{token:?}").contains("eyJhbGci"));
//!
//! // Reading the value is always explicit
//! let bearer: &str = token.encoded.expose_secret();
//! assert!(bearer.starts_with("eyJ"));
//! ```

pub use secrecy::{ExposeSecret, SecretString};

/// Length in bytes of a secret string, without exposing it to the caller.
#[must_use]
pub fn secret_len(secret: &SecretString) -> usize {
    secret.expose_secret().len()
}
