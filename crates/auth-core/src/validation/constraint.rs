//! Field-level uniqueness constraint.

use crate::errors::{ValidationError, ValidatorFailure};
use crate::validation::registry::ValidationRegistry;
use crate::validation::{Validator, ValidatorKey};
use std::sync::Arc;

/// A field constraint backed by a validator chosen at wiring time.
#[derive(Clone)]
pub struct UniqueConstraint {
    field: String,
    validator: Arc<dyn Validator>,
}

impl std::fmt::Debug for UniqueConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniqueConstraint")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

impl UniqueConstraint {
    pub fn new(field: impl Into<String>, validator: Arc<dyn Validator>) -> Self {
        Self {
            field: field.into(),
            validator,
        }
    }

    /// Build a constraint whose validator is resolved from `registry` now.
    ///
    /// # Errors
    ///
    /// Returns `UnknownValidatorKey` if `key` is unbound, so a wiring mistake
    /// surfaces at startup rather than on the first check.
    pub fn from_registry(
        field: impl Into<String>,
        registry: &ValidationRegistry,
        key: &ValidatorKey,
    ) -> Result<Self, ValidationError> {
        let validator = registry.resolve(key)?;
        Ok(Self::new(field, validator))
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Check a field value. Absent or empty values are not unique.
    ///
    /// # Errors
    ///
    /// Returns whatever the validator fails with.
    pub fn check(&self, value: Option<&str>) -> Result<bool, ValidatorFailure> {
        match value.filter(|v| !v.is_empty()) {
            Some(value) => self.validator.is_valid(value),
            None => Ok(false),
        }
    }
}
