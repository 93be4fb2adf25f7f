//! Validator test doubles

use auth_core::errors::ValidatorFailure;
use auth_core::validation::Validator;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Answers with a fixed verdict and records every candidate it sees.
#[derive(Debug)]
pub struct RecordingValidator {
    answer: bool,
    calls: AtomicUsize,
    candidates: Mutex<Vec<String>>,
}

impl RecordingValidator {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            candidates: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn candidates(&self) -> Vec<String> {
        self.candidates.lock().unwrap().clone()
    }
}

impl Validator for RecordingValidator {
    fn is_valid(&self, candidate: &str) -> Result<bool, ValidatorFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.candidates.lock().unwrap().push(candidate.to_string());
        Ok(self.answer)
    }
}

/// Always answers with the same verdict.
#[derive(Debug, Clone, Copy)]
pub struct StaticValidator(pub bool);

impl Validator for StaticValidator {
    fn is_valid(&self, _candidate: &str) -> Result<bool, ValidatorFailure> {
        Ok(self.0)
    }
}

/// Always fails with the given error.
#[derive(Debug, Clone)]
pub struct FailingValidator(pub ValidatorFailure);

impl FailingValidator {
    pub fn unavailable(reason: &str) -> Self {
        Self(ValidatorFailure::Unavailable(reason.to_string()))
    }
}

impl Validator for FailingValidator {
    fn is_valid(&self, _candidate: &str) -> Result<bool, ValidatorFailure> {
        Err(self.0.clone())
    }
}
