//! Named, runtime-selectable value validators.
//!
//! Validators are bound to a [`ValidatorKey`] in a [`ValidationRegistry`] at
//! startup. Constraints receive their validator explicitly, either directly or
//! by resolving a key against a registry when they are built.

pub mod constraint;
pub mod registry;
pub mod uniqueness;

pub use constraint::UniqueConstraint;
pub use registry::ValidationRegistry;
pub use uniqueness::{ExistingValues, InMemoryValueStore, UniquenessValidator};

use crate::errors::ValidatorFailure;
use std::borrow::Cow;
use std::fmt;

/// Well-known key for the email uniqueness check.
pub const EMAIL_UNIQUENESS: ValidatorKey = ValidatorKey::from_static("emailUniqueness");

/// A validity check over a candidate value.
///
/// Implementations may block (e.g. on a store lookup). Failures of the check
/// itself are reported as `Err`, never as `Ok(false)`.
pub trait Validator: Send + Sync {
    fn is_valid(&self, candidate: &str) -> Result<bool, ValidatorFailure>;
}

impl<F> Validator for F
where
    F: Fn(&str) -> Result<bool, ValidatorFailure> + Send + Sync,
{
    fn is_valid(&self, candidate: &str) -> Result<bool, ValidatorFailure> {
        self(candidate)
    }
}

/// Lookup key for a registered validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatorKey(Cow<'static, str>);

impl ValidatorKey {
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ValidatorKey {
    fn from(key: &str) -> Self {
        Self(Cow::Owned(key.to_string()))
    }
}

impl From<String> for ValidatorKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl fmt::Display for ValidatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
