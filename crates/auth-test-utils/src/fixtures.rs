//! Settings and factory fixtures

use crate::test_ids::*;
use auth_core::config::TokenSettings;
use auth_core::tokens::{Principal, TokenEnhancer, TokenFactory};
use common::secret::SecretString;
use std::collections::HashMap;
use std::time::Duration;

/// Settings matching the reference scenario: `dch-auth`, 15 minute access
/// tokens, 30 day refresh tokens.
pub fn test_settings() -> TokenSettings {
    test_settings_with_secret(TEST_SIGNING_SECRET)
}

/// Same lifetimes and issuer, different signing secret.
pub fn test_settings_with_secret(secret: &str) -> TokenSettings {
    TokenSettings::new(
        TEST_ISSUER,
        SecretString::from(secret),
        Duration::from_secs(TEST_ACCESS_TOKEN_MINUTES * 60),
        Duration::from_secs(TEST_REFRESH_TOKEN_MINUTES * 60),
    )
    .expect("test settings must be valid")
}

/// Environment variables that `TokenSettings::from_vars` accepts.
pub fn test_settings_vars() -> HashMap<String, String> {
    HashMap::from([
        ("TOKEN_ISSUER".to_string(), TEST_ISSUER.to_string()),
        ("TOKEN_SIGNING_KEY".to_string(), TEST_SIGNING_SECRET.to_string()),
    ])
}

pub fn test_factory() -> TokenFactory {
    TokenFactory::new(test_settings())
}

/// Enhancer with the default contributors, signing with `factory`'s secret.
pub fn test_enhancer(factory: &TokenFactory) -> TokenEnhancer {
    TokenEnhancer::new(factory)
}

/// `alice` with `[ROLE_USER, ROLE_ADMIN]`.
pub fn test_principal() -> Principal {
    Principal::new(TEST_USER_ALICE, [ROLE_USER, ROLE_ADMIN])
}
