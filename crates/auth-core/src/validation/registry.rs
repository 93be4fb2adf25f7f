//! Key to validator bindings.

use crate::errors::ValidationError;
use crate::observability::record_validator_check;
use crate::validation::{Validator, ValidatorKey};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry of validators by key.
///
/// Bindings are written at startup and read concurrently afterwards. Writers
/// never leave the map half-updated, so a poisoned lock is recovered rather
/// than propagated.
#[derive(Default)]
pub struct ValidationRegistry {
    validators: RwLock<HashMap<ValidatorKey, Arc<dyn Validator>>>,
}

impl std::fmt::Debug for ValidationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

impl ValidationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `validator` to `key`. The last registration wins; the previous
    /// binding, if any, is returned.
    pub fn register(
        &self,
        key: impl Into<ValidatorKey>,
        validator: Arc<dyn Validator>,
    ) -> Option<Arc<dyn Validator>> {
        let key = key.into();
        let mut validators = self
            .validators
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let previous = validators.insert(key.clone(), validator);
        if previous.is_some() {
            tracing::warn!(target: "auth.validation", key = %key, "Validator binding replaced");
        } else {
            tracing::debug!(target: "auth.validation", key = %key, "Validator registered");
        }
        previous
    }

    /// Look up the validator bound to `key`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownValidatorKey` if nothing is bound under `key`.
    pub fn resolve(&self, key: &ValidatorKey) -> Result<Arc<dyn Validator>, ValidationError> {
        self.validators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| ValidationError::UnknownValidatorKey(key.to_string()))
    }

    /// Resolve `key` and check `candidate` with it.
    ///
    /// An empty or absent candidate is invalid and the validator is not
    /// invoked. The key is resolved first, so an unbound key is reported even
    /// for an empty candidate.
    ///
    /// # Errors
    ///
    /// - `UnknownValidatorKey` - nothing is bound under `key`
    /// - `Validator` - the validator itself failed; passed through unchanged
    pub fn check_value<'a>(
        &self,
        key: &ValidatorKey,
        candidate: impl Into<Option<&'a str>>,
    ) -> Result<bool, ValidationError> {
        let validator = match self.resolve(key) {
            Ok(validator) => validator,
            Err(e) => {
                record_validator_check(key.as_str(), "unknown_key");
                tracing::error!(
                    target: "auth.validation",
                    key = %key,
                    "No validator registered for key"
                );
                return Err(e);
            }
        };

        let Some(candidate) = candidate.into().filter(|c| !c.is_empty()) else {
            record_validator_check(key.as_str(), "empty");
            return Ok(false);
        };

        match validator.is_valid(candidate) {
            Ok(valid) => {
                record_validator_check(key.as_str(), if valid { "valid" } else { "invalid" });
                Ok(valid)
            }
            Err(e) => {
                record_validator_check(key.as_str(), "error");
                tracing::warn!(
                    target: "auth.validation",
                    key = %key,
                    error = %e,
                    "Validator failed"
                );
                Err(e.into())
            }
        }
    }

    pub fn contains(&self, key: &ValidatorKey) -> bool {
        self.validators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.validators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<ValidatorKey> {
        let mut keys: Vec<ValidatorKey> = self
            .validators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}
