//! "Value not already taken" validation over a pluggable store.

use crate::errors::ValidatorFailure;
use crate::validation::Validator;
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Read access to the set of values already in use.
pub trait ExistingValues: Send + Sync {
    fn contains(&self, value: &str) -> Result<bool, ValidatorFailure>;
}

/// In-process store of taken values.
#[derive(Debug, Default)]
pub struct InMemoryValueStore {
    values: RwLock<HashSet<String>>,
    case_insensitive: bool,
}

impl InMemoryValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that compares values after lowercasing, as email addresses are
    /// usually compared.
    pub fn case_insensitive() -> Self {
        Self {
            values: RwLock::default(),
            case_insensitive: true,
        }
    }

    fn normalize(&self, value: &str) -> String {
        if self.case_insensitive {
            value.to_lowercase()
        } else {
            value.to_string()
        }
    }

    /// Returns `false` if the value was already present.
    pub fn insert(&self, value: &str) -> bool {
        let value = self.normalize(value);
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(value)
    }

    /// Returns `true` if the value was present.
    pub fn remove(&self, value: &str) -> bool {
        let value = self.normalize(value);
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&value)
    }

    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: AsRef<str>> FromIterator<V> for InMemoryValueStore {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let store = Self::new();
        for value in iter {
            store.insert(value.as_ref());
        }
        store
    }
}

impl ExistingValues for InMemoryValueStore {
    fn contains(&self, value: &str) -> Result<bool, ValidatorFailure> {
        let value = self.normalize(value);
        Ok(self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&value))
    }
}

/// Valid when the candidate is not already present in the store.
#[derive(Debug)]
pub struct UniquenessValidator<S> {
    store: S,
}

impl<S: ExistingValues> UniquenessValidator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ExistingValues> Validator for UniquenessValidator<S> {
    fn is_valid(&self, candidate: &str) -> Result<bool, ValidatorFailure> {
        self.store.contains(candidate).map(|taken| !taken)
    }
}

impl<S: ExistingValues> ExistingValues for std::sync::Arc<S> {
    fn contains(&self, value: &str) -> Result<bool, ValidatorFailure> {
        (**self).contains(value)
    }
}
