//! Metrics definitions for token issuance and validator dispatch
//!
//! All metrics follow Prometheus naming conventions:
//! - `auth_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `kind`: 2 values (access, refresh)
//! - `status`: 2 values (success, error)
//! - `error_category`: 3 values (precondition, configuration, cryptographic)
//! - `key`: bounded by the validator keys registered at startup
//! - `outcome`: 5 values (valid, invalid, empty, unknown_key, error)

use metrics::{counter, histogram};
use std::time::Duration;

// ============================================================================
// Token Metrics
// ============================================================================

/// Record token issuance duration and outcome
///
/// Metric: `auth_token_issuance_duration_seconds`, `auth_token_issuance_total`
/// Labels: `kind`, `status`
pub fn record_token_issuance(kind: &str, status: &str, duration: Duration) {
    histogram!(
        "auth_token_issuance_duration_seconds",
        "kind" => kind.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());

    counter!(
        "auth_token_issuance_total",
        "kind" => kind.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record token verification result
///
/// Metric: `auth_token_validations_total`
/// Labels: `status`, `error_category`
pub fn record_token_validation(status: &str, error_category: Option<&str>) {
    let category = error_category.unwrap_or("none");
    counter!(
        "auth_token_validations_total",
        "status" => status.to_string(),
        "error_category" => category.to_string()
    )
    .increment(1);
}

/// Record token enhancement outcome
///
/// Metric: `auth_token_enhancements_total`
/// Labels: `status`
pub fn record_token_enhancement(status: &str) {
    counter!("auth_token_enhancements_total", "status" => status.to_string()).increment(1);
}

// ============================================================================
// Validator Metrics
// ============================================================================

/// Record a registry-dispatched validity check
///
/// Metric: `auth_validator_checks_total`
/// Labels: `key`, `outcome`
pub fn record_validator_check(key: &str, outcome: &str) {
    counter!(
        "auth_validator_checks_total",
        "key" => key.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}
