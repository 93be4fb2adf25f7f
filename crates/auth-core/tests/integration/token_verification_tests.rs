//! Integration tests for token verification
//!
//! Raw tokens are built with `TestClaimsBuilder` so every rejection path can
//! be exercised without going through the factory.

use auth_core::config::TokenSettings;
use auth_core::errors::AuthError;
use auth_core::tokens::TokenFactory;
use auth_test_utils::*;
use jsonwebtoken::Algorithm;
use serde_json::json;
use std::time::Duration;

fn assert_invalid(result: Result<auth_core::tokens::Claims, AuthError>) {
    match result {
        Err(AuthError::InvalidToken(message)) => {
            assert_eq!(message, "The token is invalid or expired");
        }
        other => panic!("expected InvalidToken, got {other:?}"),
    }
}

#[test]
fn test_round_trip_with_same_secret() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let token = factory.create_access_token(&test_principal())?;

    let claims = factory.verify(token.as_str())?;
    assert_eq!(&claims, token.claims());

    Ok(())
}

#[test]
fn test_different_secret_fails() -> Result<(), anyhow::Error> {
    let issuer = test_factory();
    let verifier = TokenFactory::new(test_settings_with_secret(OTHER_SIGNING_SECRET));

    let token = issuer.create_access_token(&test_principal())?;
    assert_invalid(verifier.verify(token.as_str()));

    Ok(())
}

#[test]
fn test_hand_signed_token_with_same_secret_verifies() -> Result<(), anyhow::Error> {
    let token = TestClaimsBuilder::new()
        .with_scopes("ROLE_USER,ROLE_ADMIN")
        .sign(TEST_SIGNING_SECRET);

    let claims = test_factory().verify_access_token(&token)?;
    assert_eq!(claims.sub, TEST_USER_ALICE);
    assert!(claims.has_scope(ROLE_ADMIN));

    Ok(())
}

#[test]
fn test_expired_token_fails() {
    let token = TestClaimsBuilder::new()
        .issued_at(chrono::Utc::now().timestamp() - 3600)
        .expires_in(-60)
        .sign(TEST_SIGNING_SECRET);

    assert_invalid(test_factory().verify(&token));
}

#[test]
fn test_foreign_issuer_fails() {
    let token = TestClaimsBuilder::new()
        .issued_by("someone-else")
        .sign(TEST_SIGNING_SECRET);

    assert_invalid(test_factory().verify(&token));
}

#[test]
fn test_missing_required_claims_fail() {
    let factory = test_factory();

    for claim in ["sub", "iss", "iat", "exp", "scopes"] {
        let token = TestClaimsBuilder::new()
            .without_claim(claim)
            .sign(TEST_SIGNING_SECRET);
        assert_invalid(factory.verify(&token));
    }
}

#[test]
fn test_other_hmac_algorithm_fails() {
    let token = TestClaimsBuilder::new()
        .with_algorithm(Algorithm::HS256)
        .sign(TEST_SIGNING_SECRET);

    assert_invalid(test_factory().verify(&token));
}

#[test]
fn test_iat_beyond_clock_skew_fails() {
    let now = chrono::Utc::now().timestamp();
    let token = TestClaimsBuilder::new()
        .issued_at(now + 600)
        .expires_in(3600)
        .sign(TEST_SIGNING_SECRET);

    assert_invalid(test_factory().verify(&token));
}

#[test]
fn test_custom_clock_skew_accepts_within_tolerance() -> Result<(), anyhow::Error> {
    let settings = test_settings().with_clock_skew(Duration::from_secs(600))?;
    let factory = TokenFactory::new(settings);

    let now = chrono::Utc::now().timestamp();
    let token = TestClaimsBuilder::new()
        .issued_at(now + 400)
        .expires_in(3600)
        .sign(TEST_SIGNING_SECRET);

    factory.verify(&token)?;
    Ok(())
}

#[test]
fn test_refresh_token_rejected_where_access_expected() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let refresh = factory.create_refresh_token(&test_principal())?;

    assert_invalid(factory.verify_access_token(refresh.as_str()));
    factory.verify_refresh_token(refresh.as_str())?;

    Ok(())
}

#[test]
fn test_access_scopes_with_jti_rejected_as_access() {
    // jti marks refresh use even without the marker scope
    let token = TestClaimsBuilder::new()
        .with_jti("b7d9e4c2-1111-4a2b-8c3d-000000000001")
        .sign(TEST_SIGNING_SECRET);

    assert_invalid(test_factory().verify_access_token(&token));
}

#[test]
fn test_refresh_marker_without_jti_rejected_as_refresh() {
    let token = TestClaimsBuilder::new()
        .with_scopes(auth_core::tokens::REFRESH_TOKEN_SCOPE)
        .sign(TEST_SIGNING_SECRET);

    assert_invalid(test_factory().verify_refresh_token(&token));
}

#[test]
fn test_additional_claims_survive_verification() -> Result<(), anyhow::Error> {
    let token = TestClaimsBuilder::new()
        .with_claim("organization", json!("acme"))
        .sign(TEST_SIGNING_SECRET);

    let claims = test_factory().verify(&token)?;
    assert_eq!(claims.additional("organization"), Some(&json!("acme")));

    Ok(())
}

#[test]
fn test_weak_secret_refused_at_startup() {
    let result = TokenSettings::new(
        TEST_ISSUER,
        common::secret::SecretString::from("short"),
        Duration::from_secs(900),
        Duration::from_secs(3600),
    );

    assert!(matches!(
        result,
        Err(auth_core::config::ConfigError::WeakSigningSecret { min: 16, actual: 5 })
    ));
}
