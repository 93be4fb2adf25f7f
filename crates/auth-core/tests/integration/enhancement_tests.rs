//! Integration tests for token enhancement

use auth_core::errors::AuthError;
use auth_core::tokens::{
    AdditionalClaims, AuthenticationContext, ClaimContributor, TokenEnhancer, ORGANIZATION_CLAIM,
};
use auth_test_utils::*;
use serde_json::json;

/// Adds a fixed tenant claim.
struct TenantClaim(&'static str);

impl ClaimContributor for TenantClaim {
    fn name(&self) -> &'static str {
        "tenant"
    }

    fn contribute(
        &self,
        _context: &AuthenticationContext,
        claims: &mut AdditionalClaims,
    ) -> Result<(), AuthError> {
        claims.insert("tenant".to_string(), json!(self.0));
        Ok(())
    }
}

#[test]
fn test_enhance_preserves_base_claims() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let principal = test_principal();
    let token = factory.create_access_token(&principal)?;

    let enhanced =
        test_enhancer(&factory).enhance(&token, &AuthenticationContext::from(&principal))?;

    let before = token.claims();
    let after = enhanced.claims();
    assert_eq!(after.sub, before.sub);
    assert_eq!(after.scopes, before.scopes);
    assert_eq!(after.iss, before.iss);
    assert_eq!(after.iat, before.iat);
    assert_eq!(after.exp, before.exp);

    // organization is the only new claim
    assert_eq!(after.additional.len(), 1);
    enhanced
        .as_str()
        .assert_valid_jwt()
        .assert_has_claim(ORGANIZATION_CLAIM, &json!(TEST_USER_ALICE));

    Ok(())
}

#[test]
fn test_enhanced_token_is_resigned_and_verifiable() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let principal = test_principal();
    let token = factory.create_access_token(&principal)?;

    let enhanced =
        test_enhancer(&factory).enhance(&token, &AuthenticationContext::from(&principal))?;

    assert_ne!(enhanced.as_str(), token.as_str());
    let verified = factory.verify_access_token(enhanced.as_str())?;
    assert_eq!(&verified, enhanced.claims());

    // The original token is still valid on its own
    factory.verify_access_token(token.as_str())?;

    Ok(())
}

#[test]
fn test_organization_follows_context_not_subject() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let token = factory.create_access_token(&test_principal())?;

    let enhanced = test_enhancer(&factory)
        .enhance(&token, &AuthenticationContext::for_principal("acme-corp"))?;

    enhanced
        .as_str()
        .assert_for_subject(TEST_USER_ALICE)
        .assert_has_claim(ORGANIZATION_CLAIM, &json!("acme-corp"));

    Ok(())
}

#[test]
fn test_missing_principal_context_fails() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let token = factory.create_access_token(&test_principal())?;

    let result = test_enhancer(&factory).enhance(&token, &AuthenticationContext::default());

    assert!(matches!(result, Err(AuthError::MissingPrincipalContext)));
    Ok(())
}

#[test]
fn test_configured_contributors_merge() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let principal = test_principal();
    let token = factory.create_access_token(&principal)?;

    let enhancer = TokenEnhancer::new(&factory).with_contributor(TenantClaim("eu-west"));
    let enhanced = enhancer.enhance(&token, &AuthenticationContext::from(&principal))?;

    assert!(enhanced.claims().base_claims_eq(token.claims()));
    enhanced
        .as_str()
        .assert_has_claim(ORGANIZATION_CLAIM, &json!(TEST_USER_ALICE))
        .assert_has_claim("tenant", &json!("eu-west"));

    Ok(())
}

#[test]
fn test_enhance_before_single_signing() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let principal = test_principal();

    let builder = factory.access_token_builder(&principal)?;
    let base = builder.base_claims();
    let token = test_enhancer(&factory)
        .enhance_builder(builder, &AuthenticationContext::from(&principal))?;

    assert!(token.claims().base_claims_eq(&base));
    factory.verify_access_token(token.as_str())?;
    token
        .as_str()
        .assert_has_claim(ORGANIZATION_CLAIM, &json!(TEST_USER_ALICE));

    Ok(())
}

#[test]
fn test_refresh_token_can_be_enhanced() -> Result<(), anyhow::Error> {
    let factory = test_factory();
    let principal = test_principal();
    let refresh = factory.create_refresh_token(&principal)?;

    let enhanced =
        test_enhancer(&factory).enhance(&refresh, &AuthenticationContext::from(&principal))?;

    assert_eq!(enhanced.claims().jti, refresh.claims().jti);
    factory.verify_refresh_token(enhanced.as_str())?;

    Ok(())
}
