//! Integration tests for emitted metrics
//!
//! Uses a thread-local `DebuggingRecorder` so tests can run in parallel.

use auth_core::tokens::{AuthenticationContext, Principal};
use auth_core::validation::{ValidationRegistry, ValidatorKey, EMAIL_UNIQUENESS};
use auth_test_utils::*;
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use std::sync::Arc;

/// Sum of counter values matching `name` and every given label.
fn counter(snapshotter: &Snapshotter, name: &str, labels: &[(&str, &str)]) -> u64 {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter(|(key, _, _, _)| {
            let key = key.key();
            key.name() == name
                && labels.iter().all(|(k, v)| {
                    key.labels()
                        .any(|label| label.key() == *k && label.value() == *v)
                })
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(count) => count,
            _ => 0,
        })
        .sum()
}

#[test]
fn test_issuance_metrics_by_kind_and_status() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let factory = test_factory();
        let _ = factory.issue_token_pair(&test_principal());
        let _ = factory.create_access_token(&Principal::new("", [ROLE_USER]));
    });

    assert_eq!(
        counter(
            &snapshotter,
            "auth_token_issuance_total",
            &[("kind", "access"), ("status", "success")]
        ),
        1
    );
    assert_eq!(
        counter(
            &snapshotter,
            "auth_token_issuance_total",
            &[("kind", "refresh"), ("status", "success")]
        ),
        1
    );
    assert_eq!(
        counter(
            &snapshotter,
            "auth_token_issuance_total",
            &[("kind", "access"), ("status", "error")]
        ),
        1
    );
}

#[test]
fn test_validation_and_enhancement_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let factory = test_factory();
        let principal = test_principal();
        let pair = factory
            .issue_token_pair(&principal)
            .expect("issue token pair");

        let _ = factory.verify_access_token(pair.access.as_str());
        let _ = factory.verify_access_token(pair.refresh.as_str());
        let _ = test_enhancer(&factory)
            .enhance(&pair.access, &AuthenticationContext::from(&principal));
        let _ = test_enhancer(&factory).enhance(&pair.access, &AuthenticationContext::default());
    });

    assert_eq!(
        counter(&snapshotter, "auth_token_validations_total", &[("status", "success")]),
        1
    );
    assert_eq!(
        counter(
            &snapshotter,
            "auth_token_validations_total",
            &[("status", "error"), ("error_category", "cryptographic")]
        ),
        1
    );
    assert_eq!(
        counter(&snapshotter, "auth_token_enhancements_total", &[("status", "success")]),
        1
    );
    assert_eq!(
        counter(&snapshotter, "auth_token_enhancements_total", &[("status", "error")]),
        1
    );
}

#[test]
fn test_validator_check_outcomes() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let registry = ValidationRegistry::new();
        registry.register(EMAIL_UNIQUENESS, Arc::new(StaticValidator(true)));

        let _ = registry.check_value(&EMAIL_UNIQUENESS, TEST_EMAIL_FREE);
        let _ = registry.check_value(&EMAIL_UNIQUENESS, "");
        let _ = registry.check_value(&ValidatorKey::from("missing"), TEST_EMAIL_FREE);
    });

    let key = EMAIL_UNIQUENESS.to_string();
    assert_eq!(
        counter(
            &snapshotter,
            "auth_validator_checks_total",
            &[("key", key.as_str()), ("outcome", "valid")]
        ),
        1
    );
    assert_eq!(
        counter(
            &snapshotter,
            "auth_validator_checks_total",
            &[("key", key.as_str()), ("outcome", "empty")]
        ),
        1
    );
    assert_eq!(
        counter(
            &snapshotter,
            "auth_validator_checks_total",
            &[("key", "missing"), ("outcome", "unknown_key")]
        ),
        1
    );
}
