//! Integration tests for exchanging refresh tokens

use auth_core::errors::AuthError;
use auth_core::models::TokenResponse;
use auth_test_utils::*;

#[test]
fn test_refresh_issues_new_pair() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let principal = test_principal();
    let pair = factory.issue_token_pair(&principal)?;

    let renewed = factory.refresh(pair.refresh.as_str(), &principal)?;

    renewed
        .access
        .as_str()
        .assert_valid_jwt()
        .assert_scopes(&[ROLE_USER, ROLE_ADMIN])
        .assert_for_subject(TEST_USER_ALICE);
    renewed.refresh.as_str().assert_refresh_token();

    assert_ne!(renewed.refresh.claims().jti, pair.refresh.claims().jti);
    Ok(())
}

#[test]
fn test_refresh_picks_up_current_authorities() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let pair = factory.issue_token_pair(&test_principal())?;

    let demoted = TestPrincipalBuilder::new().with_authority(ROLE_USER).build();
    let renewed = factory.refresh(pair.refresh.as_str(), &demoted)?;

    renewed.access.as_str().assert_scopes(&[ROLE_USER]);
    Ok(())
}

#[test]
fn test_refresh_for_other_principal_fails() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let pair = factory.issue_token_pair(&test_principal())?;

    let bob = TestPrincipalBuilder::new()
        .for_user(TEST_USER_BOB)
        .with_authority(ROLE_USER)
        .build();

    assert!(matches!(
        factory.refresh(pair.refresh.as_str(), &bob),
        Err(AuthError::InvalidToken(_))
    ));
    Ok(())
}

#[test]
fn test_refresh_with_access_token_fails() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let principal = test_principal();
    let pair = factory.issue_token_pair(&principal)?;

    assert!(matches!(
        factory.refresh(pair.access.as_str(), &principal),
        Err(AuthError::InvalidToken(_))
    ));
    Ok(())
}

#[test]
fn test_expired_refresh_token_fails() {
    let token = TestClaimsBuilder::new()
        .with_scopes(auth_core::tokens::REFRESH_TOKEN_SCOPE)
        .with_jti("4a1f0000-0000-4000-8000-000000000001")
        .issued_at(chrono::Utc::now().timestamp() - 7200)
        .expires_in(-1)
        .sign(TEST_SIGNING_SECRET);

    assert!(matches!(
        test_factory().refresh(&token, &test_principal()),
        Err(AuthError::InvalidToken(_))
    ));
}

#[test]
fn test_token_response_from_pair() -> Result<(), anyhow::Error> {
    let pair = test_factory().issue_token_pair(&test_principal())?;
    let response = TokenResponse::from(&pair);

    assert_eq!(response.token_type, "Bearer");
    assert_eq!(response.expires_in, TEST_ACCESS_TOKEN_MINUTES * 60);
    assert_eq!(response.scope, "ROLE_USER ROLE_ADMIN");
    response.refresh_token.as_str().assert_refresh_token();

    Ok(())
}
